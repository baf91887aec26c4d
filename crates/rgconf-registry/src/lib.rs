//!
//! ## Introduction
//! This crate holds the state that a firmware configuration run resolves: the table of options,
//! the rules for who may overwrite whom, and the license gate that decides which optional modules
//! can be compiled in. Everything that *decides* values (distribution, hardware and OS rules) lives
//! elsewhere and talks to this crate through [`Registry`] and [`LicenseGate`].
//!
//! ## Terminology
//!
//! ### Tokens and options
//! A **token** is the name of a configuration option, e.g. `CONFIG_RG_PPP`. The **option** is the
//! token plus its current value, its [`OptionKind`] tags, a description, where it was last written
//! from and at what priority. The set of tokens is fixed once the registry is built from its
//! default table.
//!
//! Values are strings. Booleans use `y`, `n` or no value at all, module options may additionally be
//! `m` (built as a loadable module), numbers are decimal or `0x` hex.
//!
//! ### Set priority
//! Every write carries a [`SetPriority`]:
//!
//! ```text
//! Init < TokenSetDefault < TokenSet < CommandLine
//! ```
//!
//! A write weaker than what the option already holds is dropped without a word. An equal-priority
//! write that changes an existing value wins, but is logged as a warning. So
//!
//! ```text
//! token_set_default(CONFIG_FOO, y)
//! -f CONFIG_FOO=n
//! ```
//!
//! leaves `CONFIG_FOO=n` no matter which of the two ran first.
//!
//! ### Modules
//! Some tokens are **modules**: they map to a numeric license feature and may only be turned on
//! through [`LicenseGate::enable_module`]. The gate checks the decoded license and the
//! `LIC_FORCE`/`LIC_AUTOCONF` policy tokens before it writes anything.
pub mod errors;
pub mod license;
pub mod macros;
pub mod option;
pub mod registry;

pub use errors::{Mismatch, RegistryError, RegistryResult};
pub use license::{FeatureId, LicenseGate, LicensePolicy, LicenseState, ModuleOutcome};
pub use option::{ConfigOption, OptionKind, Provenance, SetPriority};
pub use registry::{Registry, RegistryPolicy, SetOutcome};

#[cfg(test)]
mod tests;
