// options.rs - Option definitions and the merged command-line registry

use std::collections::{HashMap, HashSet};

use clap::{Arg, ArgAction, Command};

use crate::errors::{ConfigError, ConfigResult};

/// Owner key used for the fixed options every run understands
pub const GLOBAL_OWNER: &str = "global";

// Long names of the fixed global options
pub const OPT_HELP: &str = "help";
pub const OPT_OUTPUT: &str = "output";
pub const OPT_TASK: &str = "task";
pub const OPT_NAME: &str = "name";
pub const OPT_CONFIG: &str = "config";
pub const OPT_GENERATE_CONFIG: &str = "generate-config";

/// A single command-line option as contributed by the dispatcher or a task plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    pub short: Option<char>,
    pub long: String,
    pub value_name: Option<String>,
    pub help: String,
    pub required: bool,
    pub takes_value: bool,
}

impl OptionDef {
    /// A presence-only option (no value)
    pub fn flag(short: Option<char>, long: &str, help: &str) -> Self {
        Self {
            short,
            long: long.to_string(),
            value_name: None,
            help: help.to_string(),
            required: false,
            takes_value: false,
        }
    }

    /// A string-valued option
    pub fn valued(short: Option<char>, long: &str, value_name: &str, help: &str) -> Self {
        Self {
            short,
            long: long.to_string(),
            value_name: Some(value_name.to_string()),
            help: help.to_string(),
            required: false,
            takes_value: true,
        }
    }

    /// Mark this option as required by its owning plugin
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rendered flag form for help sections, e.g. "-o, --output <PATH>"
    pub fn render_flag(&self) -> String {
        let mut rendered = match self.short {
            Some(short) => format!("-{}, --{}", short, self.long),
            None => format!("--{}", self.long),
        };
        if self.takes_value {
            if let Some(value_name) = &self.value_name {
                rendered.push_str(&format!(" <{}>", value_name));
            }
        }
        rendered
    }

    // Shape identity for sharing a global option: same short flag, same value arity.
    // Help text and value-name hints may differ between the global and a plugin's copy.
    fn same_shape(&self, other: &OptionDef) -> bool {
        self.short == other.short && self.takes_value == other.takes_value
    }
}

/// Registry of all recognized options across the dispatcher and every
/// registered plugin. Long names are unique; collisions are registration errors.
pub struct OptionRegistry {
    options: Vec<OptionDef>,
    owners: HashMap<String, String>,
}

impl OptionRegistry {
    /// Create a registry pre-seeded with the fixed global options
    pub fn with_global_options() -> Self {
        let mut registry = Self {
            options: Vec::new(),
            owners: HashMap::new(),
        };

        // Seeding the globals cannot collide with anything
        let globals = [
            OptionDef::flag(Some('h'), OPT_HELP, "Show this help message"),
            OptionDef::valued(
                Some('o'),
                OPT_OUTPUT,
                "PATH",
                "Directory where analysis results are written (created if missing)",
            ),
            OptionDef::valued(Some('t'), OPT_TASK, "TASK", "Specify the TLR-task to perform"),
            OptionDef::valued(
                Some('n'),
                OPT_NAME,
                "NAME",
                "Name of the project that should be analyzed",
            ),
            OptionDef::valued(
                Some('c'),
                OPT_CONFIG,
                "FILE",
                "TOML configuration file supplying values for omitted options",
            ),
            OptionDef::flag(
                None,
                OPT_GENERATE_CONFIG,
                "Print a sample configuration file and exit",
            ),
        ];
        for def in globals {
            registry.owners.insert(def.long.clone(), GLOBAL_OWNER.to_string());
            registry.options.push(def);
        }

        registry
    }

    /// Register a single option under the given owner
    pub fn register(&mut self, owner: &str, def: OptionDef) -> ConfigResult<()> {
        if let Some(existing_owner) = self.owners.get(&def.long) {
            return Err(ConfigError::DuplicateOption {
                long: def.long.clone(),
                owner: owner.to_string(),
                existing_owner: existing_owner.clone(),
            });
        }
        self.owners.insert(def.long.clone(), owner.to_string());
        self.options.push(def);
        Ok(())
    }

    /// Register all options a plugin exposes. The merge is atomic: if any
    /// option collides, nothing is added and the first collision is returned.
    /// A plugin option that matches an existing global in name and shape is
    /// treated as a shared reference to that global and skipped.
    pub fn merge(&mut self, owner: &str, defs: &[OptionDef]) -> ConfigResult<()> {
        let mut to_add: Vec<&OptionDef> = Vec::new();
        let mut pending: HashSet<&str> = HashSet::new();

        for def in defs {
            match self.owners.get(&def.long) {
                Some(existing_owner) if existing_owner == GLOBAL_OWNER => {
                    let global = self
                        .find(&def.long)
                        .filter(|g| g.same_shape(def));
                    if global.is_none() {
                        return Err(ConfigError::DuplicateOption {
                            long: def.long.clone(),
                            owner: owner.to_string(),
                            existing_owner: GLOBAL_OWNER.to_string(),
                        });
                    }
                    // Shared global such as --name; already registered
                }
                Some(existing_owner) => {
                    return Err(ConfigError::DuplicateOption {
                        long: def.long.clone(),
                        owner: owner.to_string(),
                        existing_owner: existing_owner.clone(),
                    });
                }
                None => {
                    if !pending.insert(def.long.as_str()) {
                        return Err(ConfigError::DuplicateOption {
                            long: def.long.clone(),
                            owner: owner.to_string(),
                            existing_owner: owner.to_string(),
                        });
                    }
                    to_add.push(def);
                }
            }
        }

        for def in to_add {
            self.owners.insert(def.long.clone(), owner.to_string());
            self.options.push(def.clone());
        }
        Ok(())
    }

    /// Look up an option by its long name
    pub fn find(&self, long: &str) -> Option<&OptionDef> {
        self.options.iter().find(|def| def.long == long)
    }

    /// Check whether an option with this long name is registered
    pub fn has_option(&self, long: &str) -> bool {
        self.owners.contains_key(long)
    }

    /// All registered options in registration order
    pub fn all_options(&self) -> &[OptionDef] {
        &self.options
    }

    /// Lower the merged option set onto a clap command. Built-in help and
    /// version handling are disabled so the dispatcher controls the help flow;
    /// no option is required at the parser level.
    pub fn build_command(&self, bin_name: &str, task_names: &[String]) -> Command {
        let mut command = Command::new(bin_name.to_string())
            .about("Traceability link recovery for software architecture artifacts")
            .disable_help_flag(true)
            .disable_version_flag(true);

        for def in &self.options {
            let mut arg = Arg::new(def.long.clone()).long(def.long.clone());
            if let Some(short) = def.short {
                arg = arg.short(short);
            }
            let help = if def.long == OPT_TASK {
                let mut valid: Vec<&str> = task_names.iter().map(|s| s.as_str()).collect();
                valid.push("ALL");
                format!("{}. Valid options are: {}", def.help, valid.join(", "))
            } else {
                def.help.clone()
            };
            arg = arg.help(help);
            if def.takes_value {
                arg = arg.action(ArgAction::Set);
                if let Some(value_name) = &def.value_name {
                    arg = arg.value_name(value_name.clone());
                }
            } else {
                arg = arg.action(ArgAction::SetTrue);
            }
            command = command.arg(arg);
        }

        command
    }
}
