use attribuitions_core::{AssetType, Storage};

use super::{decode, required_payload, Reply};
use crate::error::{CommandError, CommandResult};

pub fn list_types(storage: &Storage, _args: &[String]) -> CommandResult<Reply> {
    let types = storage
        .list_types()
        .map_err(CommandError::storage("error listing types"))?;
    Ok(Reply::Types(types))
}

/// `{"name": ...}`
pub fn add_type(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let kind: AssetType = decode(required_payload(args)?, "type")?;
    if kind.name.is_empty() {
        return Err(CommandError::InvalidValue);
    }
    storage
        .add_type(&kind.name)
        .map_err(CommandError::storage("error adding type"))?;
    Ok(Reply::done())
}

/// `{"_id": ..., "name": ...}`
pub fn update_type(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let kind: AssetType = decode(required_payload(args)?, "type")?;
    if kind.name.is_empty() || kind.id == 0 {
        return Err(CommandError::InvalidValue);
    }
    storage
        .update_type(kind.id, &kind.name)
        .map_err(CommandError::storage("error updating type"))?;
    Ok(Reply::done())
}

/// `{"_id": ...}`
pub fn delete_type(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let kind: AssetType = decode(required_payload(args)?, "type")?;
    if kind.id == 0 {
        return Err(CommandError::InvalidValue);
    }
    storage
        .delete_type(kind.id)
        .map_err(CommandError::storage("error deleting type"))?;
    Ok(Reply::done())
}
