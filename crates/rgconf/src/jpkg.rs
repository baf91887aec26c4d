//! JPKG: resolving several sub-targets in one run.
//!
//! A distribution registers sub-targets with [`ConfigContext::register_distribution`]. Each one
//! gets its own copy of the default table. [`replay_all`] swaps that copy in as the active registry,
//! re-asserts the primary's command-line options and runs the distribution, OS and feature passes
//! against it. [`merge_defaults`] then gives every option the primary left unset the first value a
//! sub-target found for it.

use anyhow::bail;
use rgconf_registry::{Provenance, Registry, SetPriority};
use tracing::{debug, info, trace};

use crate::RgConfResult;
use crate::context::ConfigContext;
use crate::rules::{self, Rules};

/// A registered sub-target and the registry it was resolved into.
#[derive(Debug, Clone)]
pub struct JpkgDist {
    pub name: String,
    pub(crate) registry: Registry,
}

impl JpkgDist {
    pub(crate) fn new(name: &str, registry: Registry) -> Self {
        JpkgDist {
            name: name.to_string(),
            registry,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Replays every registered distribution in registration order, including the ones registered
/// while replaying.
pub fn replay_all<R: Rules + ?Sized>(ctx: &mut ConfigContext, rules: &R) -> RgConfResult<()> {
    let mut index = 0;
    while index < ctx.jpkg.len() {
        replay(ctx, index, rules)?;
        index += 1;
    }
    Ok(())
}

/// Resolves the `index`th registered distribution into its own registry.
///
/// The primary registry and target are put back when this returns, whether or not the passes
/// succeeded.
pub(crate) fn replay<R: Rules + ?Sized>(
    ctx: &mut ConfigContext,
    index: usize,
    rules: &R,
) -> RgConfResult<()> {
    let Some(dist) = ctx.jpkg.get(index) else {
        bail!(
            "no JPKG distribution #{index}, only {} registered",
            ctx.jpkg.len()
        );
    };
    let name = dist.name.clone();
    info!("Configuring JPKG distribution {name}");

    let command_line: Vec<(String, String)> = ctx
        .registry
        .command_line_options()
        .filter_map(|o| o.value.clone().map(|v| (o.token.clone(), v)))
        .collect();

    let clone = std::mem::take(&mut ctx.jpkg[index].registry);
    let primary = std::mem::replace(&mut ctx.registry, clone);
    let saved_target = ctx.target.clone();

    let mut guard = scopeguard::guard(ctx, move |ctx| {
        let clone = std::mem::replace(&mut ctx.registry, primary);
        ctx.jpkg[index].registry = clone;
        ctx.target = saved_target;
    });
    let ctx: &mut ConfigContext = &mut guard;

    let jpkg_token = ctx.tokens.jpkg;
    ctx.token_set_y(jpkg_token)?;
    for (token, value) in &command_line {
        ctx.registry
            .set(token, value, SetPriority::CommandLine, Provenance::COMMAND_LINE)?;
    }

    ctx.target.dist = name;
    ctx.target.os.clear();

    rules::distribution_pass(ctx, rules)?;
    rules::os_pass(ctx, rules)?;
    rules::configure_features(ctx, rules)?;

    debug!(dist = %ctx.target.dist, hw = %ctx.target.hw, "JPKG distribution resolved");
    Ok(())
}

/// Fills every option the primary registry left unset from the first sub-target that has a
/// non-empty value for it. Priorities are left alone. Returns how many options were filled.
pub fn merge_defaults(ctx: &mut ConfigContext) -> RgConfResult<usize> {
    let unset: Vec<String> = ctx
        .registry
        .iter()
        .filter(|o| o.value.is_none())
        .map(|o| o.token.clone())
        .collect();

    let mut filled = 0;
    for token in unset {
        let Some(found) = ctx
            .jpkg
            .iter()
            .filter_map(|d| d.registry.find(&token))
            .find(|o| o.has_value())
        else {
            continue;
        };

        let value = found.value.clone().unwrap_or_default();
        if ctx.registry.fill_unset(&token, &value, found.provenance)? {
            trace!(token, value, "inherited from JPKG distribution");
            filled += 1;
        }
    }

    debug!("{filled} options inherited from JPKG distributions");
    Ok(filled)
}
