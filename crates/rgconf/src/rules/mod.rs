//! Rule passes: the code that decides what a distribution, board or OS turns on.
//!
//! A [`Rules`] implementation provides the individual passes. The functions in this module wrap
//! them with the bookkeeping the engine owns itself, such as writing the target identity tokens.

use anyhow::bail;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::RgConfResult;
use crate::context::ConfigContext;
use crate::errors::ContextError;

pub mod builtin;

pub use builtin::BuiltinRules;

/// Known target names, each with a one-line description.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub distributions: IndexMap<&'static str, &'static str>,
    pub hardware: IndexMap<&'static str, &'static str>,
    pub operating_systems: IndexMap<&'static str, &'static str>,
}

impl Catalog {
    pub(crate) fn legal(names: &IndexMap<&'static str, &'static str>) -> String {
        names.keys().join(" ")
    }
}

pub trait Rules {
    fn catalog(&self) -> &Catalog;

    /// License file to fall back on when neither `LIC` nor `LICSTR` was given.
    fn default_license(&self, _ctx: &ConfigContext) -> Option<String> {
        None
    }

    /// Sets the target's hardware and OS and enables what the distribution ships.
    fn distribution(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Runs only when the target has an OS.
    fn target_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Board specifics. The hardware identity tokens are already written.
    fn hardware(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Features every target gets.
    fn common(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Features derived from the modules and features enabled so far.
    fn general(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Settles the primary OS token. Not run for JPKG sub-targets.
    fn primary_os(&self, ctx: &mut ConfigContext) -> RgConfResult<()>;

    /// Host build settings.
    fn host(&self, _ctx: &mut ConfigContext) -> RgConfResult<()> {
        Ok(())
    }
}

pub fn distribution_pass<R: Rules + ?Sized>(ctx: &mut ConfigContext, rules: &R) -> RgConfResult<()> {
    if ctx.target().dist.is_empty() {
        bail!(ContextError::NoDistribution);
    }

    debug!(dist = %ctx.target().dist, "distribution pass");
    rules.distribution(ctx)?;

    let dist = ctx.target().dist.clone();
    let token = ctx.tokens().dist;
    ctx.token_set(token, &dist)?;
    Ok(())
}

pub fn os_pass<R: Rules + ?Sized>(ctx: &mut ConfigContext, rules: &R) -> RgConfResult<()> {
    if ctx.target().os.is_empty() {
        return Ok(());
    }

    debug!(os = %ctx.target().os, "OS pass");
    rules.target_os(ctx)
}

/// Writes the hardware identity, then runs the board rules. Without hardware only local targets
/// can be built and the board rules are skipped.
pub fn hardware_pass<R: Rules + ?Sized>(ctx: &mut ConfigContext, rules: &R) -> RgConfResult<()> {
    let tokens = ctx.tokens().clone();
    let hw = ctx.target().hw.clone();

    if hw.is_empty() {
        ctx.token_set(tokens.hw, "NO_HW")?;
        ctx.token_set(tokens.hw_description, "No hardware - local targets only")?;
        ctx.token_set_y(tokens.local_targets_only)?;
        return Ok(());
    }

    let Some(description) = rules.catalog().hardware.get(hw.as_str()) else {
        bail!(ContextError::NoHardwareDescription(hw));
    };

    debug!(hw, "hardware pass");
    ctx.token_set(tokens.hw, &hw)?;
    ctx.token_set(tokens.hw_description, description)?;
    rules.hardware(ctx)
}

/// Hardware, common and general passes, in that order.
pub fn configure_features<R: Rules + ?Sized>(
    ctx: &mut ConfigContext,
    rules: &R,
) -> RgConfResult<()> {
    hardware_pass(ctx, rules)?;
    debug!("common pass");
    rules.common(ctx)?;
    debug!("general pass");
    rules.general(ctx)
}

/// Checks the target names once the distribution has had its say.
pub fn validate_target(ctx: &ConfigContext, catalog: &Catalog) -> RgConfResult<()> {
    let target = ctx.target();

    if !target.os.is_empty() && !catalog.operating_systems.contains_key(target.os.as_str()) {
        bail!(ContextError::UnknownTarget {
            kind: "OS",
            name: target.os.clone(),
            legal: Catalog::legal(&catalog.operating_systems),
        });
    }

    if target.hw.is_empty() && !target.os.is_empty() {
        bail!(ContextError::CannotDetermineHardware);
    }

    if !catalog.distributions.contains_key(target.dist.as_str()) {
        bail!(ContextError::UnknownTarget {
            kind: "Distribution",
            name: target.dist.clone(),
            legal: Catalog::legal(&catalog.distributions),
        });
    }

    if !target.hw.is_empty() && !catalog.hardware.contains_key(target.hw.as_str()) {
        bail!(ContextError::UnknownTarget {
            kind: "Hardware",
            name: target.hw.clone(),
            legal: Catalog::legal(&catalog.hardware),
        });
    }

    Ok(())
}
