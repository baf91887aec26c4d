//! The `create_config` driver.
//!
//! A run starts from the default option table, applies command-line overrides and the license,
//! then lets a [`Rules`](rules::Rules) implementation populate the registry pass by pass:
//!
//! ```text
//! distribution -> OS -> hardware -> common -> general -> JPKG replay/merge -> primary OS -> host
//! ```
//!
//! Rules never see the registry directly. They receive a [`ConfigContext`], whose write methods
//! record the caller's source location and refuse plain writes to licensed modules.
//!
//! Distributions may register JPKG sub-targets (see [`jpkg`]). Each one is resolved against its own
//! copy of the default table, and values the primary run left unset are filled in from them.

pub mod context;
pub mod defaults;
pub mod driver;
pub mod errors;
pub mod jpkg;
pub mod license;
pub mod rules;
pub mod utils;

pub use context::{ConfigContext, Target, TargetTokens};
pub use driver::{Invocation, ReportPaths, run};
pub use errors::ContextError;

pub type RgConfResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests;
