use attribuitions_core::{Licence, Storage};

use super::{decode, required_payload, Reply};
use crate::error::{CommandError, CommandResult};

pub fn list_licences(storage: &Storage, _args: &[String]) -> CommandResult<Reply> {
    let licences = storage
        .list_licences()
        .map_err(CommandError::storage("error listing licences"))?;
    Ok(Reply::Licences(licences))
}

/// `{"name": ..., "link": ...}`
pub fn add_licence(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let licence: Licence = decode(required_payload(args)?, "licence")?;
    if licence.name.is_empty() || licence.link.is_empty() {
        return Err(CommandError::InvalidValue);
    }
    storage
        .add_licence(&licence.name, &licence.link)
        .map_err(CommandError::storage("error adding licence"))?;
    Ok(Reply::done())
}

/// `{"_id": ..., "name": ..., "link": ...}`
pub fn update_licence(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let licence: Licence = decode(required_payload(args)?, "licence")?;
    if licence.name.is_empty() || licence.link.is_empty() || licence.id == 0 {
        return Err(CommandError::InvalidValue);
    }
    storage
        .update_licence(licence.id, &licence.name, &licence.link)
        .map_err(CommandError::storage("error updating licence"))?;
    Ok(Reply::done())
}

/// `{"_id": ...}`
pub fn delete_licence(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let licence: Licence = decode(required_payload(args)?, "licence")?;
    if licence.id == 0 {
        return Err(CommandError::InvalidValue);
    }
    storage
        .delete_licence(licence.id)
        .map_err(CommandError::storage("error deleting licence"))?;
    Ok(Reply::done())
}
