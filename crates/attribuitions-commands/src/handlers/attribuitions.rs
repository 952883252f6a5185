use attribuitions_core::{Attribuition, Query, Storage};

use super::{decode, payload, required_payload, Reply};
use crate::error::{CommandError, CommandResult};

/// Optional payload `{"text": ..., "order": "ASC"|"DESC"}`; without one,
/// every attribuition is listed in ascending order.
pub fn list_attribuitions(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let query = match payload(args) {
        Some(raw) => {
            Query::parse(raw).map_err(|source| CommandError::Decode {
                what: "query",
                source,
            })?
        }
        None => Query::default(),
    };

    let credits = storage
        .find_attribuitions(query.order, &query.text)
        .map_err(CommandError::storage("error listing attribuitions"))?;
    Ok(Reply::Attribuitions(credits))
}

/// Needs `name`, `author`, `link`, `type` and `licence`; `filename` may be empty.
pub fn add_attribuition(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let credit: Attribuition = decode(required_payload(args)?, "attribuition")?;
    if credit.name.is_empty()
        || credit.link.is_empty()
        || credit.author.is_empty()
        || credit.kind.is_empty()
        || credit.licence.is_empty()
    {
        return Err(CommandError::InvalidValue);
    }
    storage
        .add_attribuition(&credit)
        .map_err(CommandError::storage("error adding attribuition"))?;
    Ok(Reply::done())
}

/// Full replace; every field including `_id` and `filename` is required.
pub fn update_attribuition(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let credit: Attribuition = decode(required_payload(args)?, "attribuition")?;
    if credit.name.is_empty()
        || credit.link.is_empty()
        || credit.author.is_empty()
        || credit.filename.is_empty()
        || credit.kind.is_empty()
        || credit.licence.is_empty()
        || credit.id == 0
    {
        return Err(CommandError::InvalidValue);
    }
    storage
        .update_attribuition(&credit)
        .map_err(CommandError::storage("error updating attribuition"))?;
    Ok(Reply::done())
}

pub fn delete_attribuition(storage: &Storage, args: &[String]) -> CommandResult<Reply> {
    let credit: Attribuition = decode(required_payload(args)?, "attribuition")?;
    if credit.id == 0 {
        return Err(CommandError::InvalidValue);
    }
    storage
        .delete_attribuition(credit.id)
        .map_err(CommandError::storage("error deleting attribuition"))?;
    Ok(Reply::done())
}
