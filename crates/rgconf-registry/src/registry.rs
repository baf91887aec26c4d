use anyhow::bail;
use indexmap::IndexMap;
use indexmap::map::Entry;
use rgconf_util::number::{is_number_value, parse_number};
use tracing::{trace, warn};

use crate::errors::{Mismatch, RegistryError, RegistryResult};
use crate::option::{ConfigOption, OptionKind, Provenance, SetPriority};

/// Tokens the resolver itself consults while writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPolicy {
    /// When truthy, `m` on a `static_on_develop` option is stored as `y`.
    pub dev_mode_token: &'static str,
    /// When truthy, [`Registry::set_m`] stores `y`: the OS cannot load modules.
    pub no_modules_token: &'static str,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        RegistryPolicy {
            dev_mode_token: "CONFIG_RG_DEV",
            no_modules_token: "CONFIG_RG_OS_VXWORKS",
        }
    }
}

/// What a [`Registry::set`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value was stored, possibly over a weaker or identical one.
    Stored,
    /// An equal-priority writer disagreed with the previous value. The new value won.
    Replaced { previous: String },
    /// The option already holds a value of higher priority.
    Ignored,
}

/// The token store. The set of tokens is fixed at construction; only values, priorities and
/// provenance change afterwards.
///
/// Cloning a registry yields a fully independent copy, which is what multi-target resolution
/// builds on.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: IndexMap<String, ConfigOption>,
    policy: RegistryPolicy,
}

impl Registry {
    /// Builds a registry from a default table, keeping table order. A token that appears twice is
    /// fatal.
    pub fn from_options<I>(options: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut map = IndexMap::new();
        for option in options {
            match map.entry(option.token.clone()) {
                Entry::Occupied(e) => {
                    bail!(RegistryError::DuplicateToken {
                        token: e.key().clone()
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(option);
                }
            }
        }

        Ok(Registry {
            options: map,
            policy: RegistryPolicy::default(),
        })
    }

    pub fn with_policy(self, policy: RegistryPolicy) -> Self {
        Registry { policy, ..self }
    }

    pub fn policy(&self) -> &RegistryPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.values()
    }

    pub fn find(&self, token: &str) -> Option<&ConfigOption> {
        self.options.get(token)
    }

    #[track_caller]
    pub fn get(&self, token: &str) -> RegistryResult<&ConfigOption> {
        match self.options.get(token) {
            Some(option) => Ok(option),
            None => bail!(RegistryError::UnknownToken {
                token: token.to_string(),
                at: Provenance::caller(),
            }),
        }
    }

    /// `y` or `m`. Reading a string option as a boolean is a bug in the caller.
    #[track_caller]
    pub fn get_bool(&self, token: &str) -> RegistryResult<bool> {
        let option = self.get(token)?;
        if option.kind.is_stringish() {
            bail!(RegistryError::TypeMismatch {
                token: token.to_string(),
                mismatch: Mismatch::StringAsBoolean,
            });
        }
        Ok(option.is_truthy())
    }

    #[track_caller]
    pub fn get_str(&self, token: &str) -> RegistryResult<Option<&str>> {
        Ok(self.get(token)?.value.as_deref())
    }

    #[track_caller]
    pub fn get_or_empty(&self, token: &str) -> RegistryResult<&str> {
        Ok(self.get_str(token)?.unwrap_or_default())
    }

    /// Exactly `y`; unlike [`Registry::get_bool`], `m` does not count.
    #[track_caller]
    pub fn is_y(&self, token: &str) -> RegistryResult<bool> {
        Ok(self.get_str(token)? == Some("y"))
    }

    /// Decimal or `0x` hex. An unset or empty option reads as zero.
    #[track_caller]
    pub fn get_number(&self, token: &str) -> RegistryResult<i64> {
        let option = self.get(token)?;
        if option.kind.is_stringish() {
            bail!(RegistryError::TypeMismatch {
                token: token.to_string(),
                mismatch: Mismatch::StringAsNumber,
            });
        }

        let value = option.value.as_deref().unwrap_or_default();
        if let Some(n) = parse_number(value) {
            return Ok(n);
        }

        let mismatch = if is_number_value(value) {
            Mismatch::OutOfRange(value.to_string())
        } else {
            Mismatch::NotNumeric(value.to_string())
        };
        bail!(RegistryError::TypeMismatch {
            token: token.to_string(),
            mismatch,
        })
    }

    /// Truthiness of a token that may not exist in this table. Policy tokens are read this way so
    /// that small registries need not declare them.
    pub fn is_truthy(&self, token: &str) -> bool {
        self.find(token).is_some_and(ConfigOption::is_truthy)
    }

    /// Whether any option carrying a tag selected by `pred` has a truthy value.
    pub fn any_set_with<F>(&self, pred: F) -> bool
    where
        F: Fn(&OptionKind) -> bool,
    {
        self.iter().any(|o| pred(&o.kind) && o.is_truthy())
    }

    /// Options written from the command line, in table order.
    pub fn command_line_options(&self) -> impl Iterator<Item = &ConfigOption> {
        self.iter().filter(|o| o.set_by_command_line())
    }

    /// The arbitrated write.
    ///
    /// `m` is checked first and regardless of priority: it is illegal on options that are not
    /// module-expandable, and becomes `y` on `static_on_develop` options while developer mode is
    /// on. A write weaker than the stored priority is dropped. An equal-priority write that changes
    /// a non-empty value goes through with a warning.
    pub fn set(
        &mut self,
        token: &str,
        value: &str,
        priority: SetPriority,
        at: Provenance,
    ) -> RegistryResult<SetOutcome> {
        let dev_mode = self.is_truthy(self.policy.dev_mode_token);

        let Some(option) = self.options.get_mut(token) else {
            bail!(RegistryError::UnknownToken {
                token: token.to_string(),
                at,
            });
        };

        let mut value = value;
        if value == "m" {
            if !option.kind.module_expand {
                bail!(RegistryError::TypeMismatch {
                    token: token.to_string(),
                    mismatch: Mismatch::ModuleNotExpandable,
                });
            }
            if option.kind.static_on_develop && dev_mode {
                trace!(token, "developer mode, linking statically");
                value = "y";
            }
        }

        if priority < option.priority {
            trace!(token, value, %priority, held = %option.priority, "ignoring weaker write");
            return Ok(SetOutcome::Ignored);
        }

        let mut outcome = SetOutcome::Stored;
        if priority == option.priority {
            if let Some(old) = option.value.as_deref() {
                if !old.is_empty() && old != value {
                    let from = option
                        .provenance
                        .map_or_else(|| "default".to_string(), |p| p.to_string());
                    warn!("Replacing {token}={old} (from {from}) with {token}={value} (from {at})");
                    outcome = SetOutcome::Replaced {
                        previous: old.to_string(),
                    };
                }
            }
        }

        trace!(token, value, %priority, %at, "set");
        option.value = Some(value.to_string());
        option.priority = priority;
        option.provenance = Some(at);
        Ok(outcome)
    }

    pub fn set_y(&mut self, token: &str, at: Provenance) -> RegistryResult<SetOutcome> {
        self.set(token, "y", SetPriority::TokenSet, at)
    }

    /// `m` at `TokenSet` priority, or `y` on an OS without loadable modules.
    pub fn set_m(&mut self, token: &str, at: Provenance) -> RegistryResult<SetOutcome> {
        let value = if self.is_truthy(self.policy.no_modules_token) {
            "y"
        } else {
            "m"
        };
        self.set(token, value, SetPriority::TokenSet, at)
    }

    /// A `-f TOKEN=VALUE` override. Internal options are off limits and an empty value is
    /// ignored.
    pub fn set_command_line(&mut self, token: &str, value: &str) -> RegistryResult<SetOutcome> {
        let option = self.get(token)?;
        if option.kind.internal {
            bail!(RegistryError::InternalToken {
                token: token.to_string()
            });
        }
        if value.is_empty() {
            return Ok(SetOutcome::Ignored);
        }
        self.set(
            token,
            value,
            SetPriority::CommandLine,
            Provenance::COMMAND_LINE,
        )
    }

    /// Gives an unset option a value without touching its priority. Returns whether anything was
    /// written.
    #[track_caller]
    pub fn fill_unset(
        &mut self,
        token: &str,
        value: &str,
        provenance: Option<Provenance>,
    ) -> RegistryResult<bool> {
        let Some(option) = self.options.get_mut(token) else {
            bail!(RegistryError::UnknownToken {
                token: token.to_string(),
                at: Provenance::caller(),
            });
        };

        if option.value.is_some() {
            return Ok(false);
        }

        option.value = Some(value.to_string());
        option.provenance = provenance;
        Ok(true)
    }
}
