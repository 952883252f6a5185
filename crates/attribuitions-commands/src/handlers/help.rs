use attribuitions_core::Storage;

use super::Reply;
use crate::error::CommandResult;

pub const USAGE: &str = r#"Usage: attribuitions <database-path> <command> [<json-payload>]

-> Attributions
attribuitions ~/mygames/attributions.sqlite listAttribuitions
attribuitions ~/mygames/attributions.sqlite listAttribuitions {"text":"<search>", "order": "ASC"}
attribuitions ~/mygames/attributions.sqlite addAttribuition {"name":"Test","filename":"file","author":"Ze","link":"http://none","licence":"MIT","type":"Music"}
attribuitions ~/mygames/attributions.sqlite updateAttribuition {"_id":1,"name":"_Test","filename":"_file","author":"_Ze","link":"_http://none","licence":"Beerware","type":"Plugin"}
attribuitions ~/mygames/attributions.sqlite deleteAttribuition {"_id":1}

-> Types
attribuitions ~/mygames/attributions.sqlite listTypes
attribuitions ~/mygames/attributions.sqlite addType {"name": "Font"}
attribuitions ~/mygames/attributions.sqlite updateType {"_id":1, "name": "FontNew"}
attribuitions ~/mygames/attributions.sqlite deleteType {"_id":1}

-> Licenses
attribuitions ~/mygames/attributions.sqlite listLicences
attribuitions ~/mygames/attributions.sqlite addLicence {"name": "Insaneware", "link": "https://example.com/license"}
attribuitions ~/mygames/attributions.sqlite updateLicence {"_id":1, "name": "Insaneware2", "link": "https://example.com/licenses"}
attribuitions ~/mygames/attributions.sqlite deleteLicence {"_id":1}
"#;

/// Usage text. Also answers every unknown command.
pub fn get_help(_storage: &Storage, _args: &[String]) -> CommandResult<Reply> {
    Ok(Reply::Message(USAGE))
}
