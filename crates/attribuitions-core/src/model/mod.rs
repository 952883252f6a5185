pub mod asset_type;
pub mod attribuition;
pub mod licence;
pub mod query;

pub use asset_type::AssetType;
pub use attribuition::Attribuition;
pub use licence::Licence;
pub use query::{Query, SortOrder};
