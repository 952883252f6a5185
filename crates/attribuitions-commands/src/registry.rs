//! Command-name to handler lookup.

use std::collections::HashMap;

use attribuitions_core::Storage;

use crate::error::CommandResult;
use crate::handlers::{attribuitions, help, licences, types, Reply};
use crate::response::format_json;

/// A command handler. `args` is `[database_path, command, payload?]`.
pub type Handler = fn(&Storage, &[String]) -> CommandResult<Reply>;

/// Index of the command name in the argument list.
pub const COMMAND_INDEX: usize = 1;

/// Immutable map of command names to handlers, built once at startup and
/// shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    handlers: HashMap<&'static str, Handler>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        let handlers: [(&'static str, Handler); 13] = [
            ("help", help::get_help),
            ("listAttribuitions", attribuitions::list_attribuitions),
            ("listTypes", types::list_types),
            ("listLicences", licences::list_licences),
            ("addType", types::add_type),
            ("addLicence", licences::add_licence),
            ("updateType", types::update_type),
            ("deleteType", types::delete_type),
            ("updateLicence", licences::update_licence),
            ("deleteLicence", licences::delete_licence),
            ("addAttribuition", attribuitions::add_attribuition),
            ("updateAttribuition", attribuitions::update_attribuition),
            ("deleteAttribuition", attribuitions::delete_attribuition),
        ];
        Self {
            handlers: HashMap::from(handlers),
        }
    }

    pub fn get(&self, command: &str) -> Option<Handler> {
        self.handlers.get(command).copied()
    }

    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Resolve a handler for `args` without running it. A missing or unknown
    /// command name resolves to `help`.
    pub fn resolve(&self, args: &[String]) -> Handler {
        match args.get(COMMAND_INDEX) {
            Some(command) => self.get(command).unwrap_or_else(|| {
                log::debug!("Unknown command {:?}, showing help", command);
                help::get_help
            }),
            None => help::get_help,
        }
    }

    /// Run the command named in `args` and format the envelope.
    pub fn dispatch(&self, storage: &Storage, args: &[String]) -> Vec<u8> {
        let handler = self.resolve(args);
        log::debug!(
            "Dispatching {}",
            args.get(COMMAND_INDEX).map_or("help", String::as_str)
        );

        let result = handler(storage, args);
        if let Err(err) = &result {
            log::warn!("Command failed: {}", err);
        }
        format_json(&result)
    }
}
