use std::path::PathBuf;

use rgconf_emit::{Commit, Emitter, Identity, MajorFeatures, OutputPaths};
use rgconf_registry::Registry;
use tracing::info;

use crate::RgConfResult;
use crate::context::{ConfigContext, Target};
use crate::defaults;
use crate::jpkg;
use crate::license::{LicenseDecoder, license_init};
use crate::rules::{self, Rules};

/// Where the major features report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub c_file: PathBuf,
}

/// One `create_config` run, as given on the command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub target: Target,
    /// `TOKEN=VALUE` overrides, in command-line order.
    pub overrides: Vec<String>,
    pub outputs: OutputPaths,
    pub report: Option<ReportPaths>,
    /// Named in the banner of every generated file.
    pub config_log: String,
}

/// Resolves the configuration and writes it out.
pub fn run<R, D>(invocation: &Invocation, rules: &R, decoder: &D) -> RgConfResult<ConfigContext>
where
    R: Rules + ?Sized,
    D: LicenseDecoder + ?Sized,
{
    let ctx = configure(invocation, rules, decoder)?;
    write(&ctx, invocation)?;
    Ok(ctx)
}

/// Runs every pass, in order, without writing anything.
pub fn configure<R, D>(
    invocation: &Invocation,
    rules: &R,
    decoder: &D,
) -> RgConfResult<ConfigContext>
where
    R: Rules + ?Sized,
    D: LicenseDecoder + ?Sized,
{
    let registry = Registry::from_options(defaults::options())?;
    let mut ctx = ConfigContext::new(registry).with_target(invocation.target.clone());

    for assignment in &invocation.overrides {
        ctx.apply_command_line(assignment)?;
    }

    license_init(&mut ctx, rules, decoder)?;

    rules::distribution_pass(&mut ctx, rules)?;
    rules::validate_target(&ctx, rules.catalog())?;
    rules::os_pass(&mut ctx, rules)?;
    rules::configure_features(&mut ctx, rules)?;

    jpkg::replay_all(&mut ctx, rules)?;
    jpkg::merge_defaults(&mut ctx)?;

    rules.primary_os(&mut ctx)?;
    rules.host(&mut ctx)?;

    let target = ctx.target();
    info!(dist = %target.dist, hw = %target.hw, os = %target.os, "Configuration resolved");
    Ok(ctx)
}

/// Writes the configuration files and, if asked for, the major features report. Either all of
/// them are replaced or none is.
pub fn write(ctx: &ConfigContext, invocation: &Invocation) -> RgConfResult<()> {
    let rendered = Emitter::new(ctx.registry(), &invocation.config_log).render()?;
    let outputs = &invocation.outputs;

    let mut commit = Commit::new();
    commit
        .add(&outputs.header, rendered.header)
        .add(&outputs.makefile, rendered.makefile)
        .add(&outputs.c_file, rendered.c_file);

    if let Some(report) = &invocation.report {
        let target = ctx.target();
        let identity = Identity {
            dist: &target.dist,
            hw: &target.hw,
            os: &target.os,
        };
        let c_file_name = report
            .c_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let features = MajorFeatures::new(ctx.registry(), identity, &c_file_name)?;
        commit
            .add(&report.text, features.text)
            .add(&report.c_file, features.c_file);
    }

    commit.finish()?;
    info!(
        "Configuration written to {}, {} and {}",
        outputs.header.display(),
        outputs.makefile.display(),
        outputs.c_file.display()
    );
    Ok(())
}
