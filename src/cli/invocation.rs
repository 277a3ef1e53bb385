// invocation.rs - Parsed command-line values shared read-only across task plugins

use std::collections::{HashMap, HashSet};

use clap::ArgMatches;

use super::options::OptionRegistry;

/// The result of parsing one command line against the merged option set.
/// Exactly one of these exists per run; plugins only read from it.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    values: HashMap<String, String>,
    flags: HashSet<String>,
}

impl Invocation {
    /// Extract every registered option from the clap matches
    pub fn from_matches(registry: &OptionRegistry, matches: &ArgMatches) -> Self {
        let mut invocation = Self::default();
        for def in registry.all_options() {
            if def.takes_value {
                if let Some(value) = matches.get_one::<String>(&def.long) {
                    invocation.values.insert(def.long.clone(), value.clone());
                }
            } else if matches.get_flag(&def.long) {
                invocation.flags.insert(def.long.clone());
            }
        }
        invocation
    }

    /// Whether an option was supplied, either with a value or as a flag
    pub fn has(&self, long: &str) -> bool {
        self.values.contains_key(long) || self.flags.contains(long)
    }

    /// The value supplied for a string-valued option
    pub fn value(&self, long: &str) -> Option<&str> {
        self.values.get(long).map(|s| s.as_str())
    }

    // Fill in a value that the command line did not supply. Returns false if
    // the option was already present (command line wins over config files).
    pub(crate) fn set_if_absent(&mut self, long: &str, value: &str) -> bool {
        if self.has(long) {
            return false;
        }
        self.values.insert(long.to_string(), value.to_string());
        true
    }
}
