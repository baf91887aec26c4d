use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use rgconf::driver::{self, Invocation, ReportPaths};
use rgconf::license::ToolDecoder;
use rgconf::rules::BuiltinRules;
use rgconf::utils::resolve_tool;
use rgconf::{RgConfResult, Target};
use rgconf_emit::OutputPaths;
use tracing_subscriber::EnvFilter;

/// Resolves a firmware build configuration and writes rg_config.h, rg_config.mk and rg_config.c
#[derive(Parser, Debug)]
#[clap(version, disable_help_flag = true)]
struct Opts {
    /// Distribution
    #[clap(short = 'd', value_name = "DIST")]
    dist: Option<String>,

    /// Hardware; the distribution may override it
    #[clap(short = 'h', value_name = "HW")]
    hw: Option<String>,

    /// Target OS; the distribution may override it
    #[clap(short = 'o', value_name = "OS")]
    os: Option<String>,

    /// Feature override, may be repeated
    #[clap(short = 'f', value_name = "TOKEN=VALUE")]
    features: Vec<String>,

    /// C file with runtime copies of the options
    #[clap(short = 'c', value_name = "C_FILE")]
    c_file: PathBuf,

    /// Makefile fragment
    #[clap(short = 'm', value_name = "MK_FILE")]
    makefile: PathBuf,

    /// C header
    #[clap(short = 'i', value_name = "H_FILE")]
    header: PathBuf,

    /// Major features list
    #[clap(short = 'M', value_name = "FILE", requires = "major_features_c")]
    major_features: Option<PathBuf>,

    /// Major features C file
    #[clap(short = 'F', value_name = "FILE", requires = "major_features")]
    major_features_c: Option<PathBuf>,

    /// Configuration log named in the generated files
    #[clap(long, env = "CONFIG_LOG", default_value = "config.log")]
    config_log: String,

    /// License tool
    #[clap(long, env = "LIC_RG_APP", default_value = "lic_rg")]
    lic_app: String,

    /// Print help
    #[clap(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Opts {
    fn invocation(self) -> Invocation {
        let report = match (self.major_features, self.major_features_c) {
            (Some(text), Some(c_file)) => Some(ReportPaths { text, c_file }),
            _ => None,
        };

        Invocation {
            target: Target {
                dist: self.dist.unwrap_or_default(),
                hw: self.hw.unwrap_or_default(),
                os: self.os.unwrap_or_default(),
            },
            overrides: self.features,
            outputs: OutputPaths {
                header: self.header,
                makefile: self.makefile,
                c_file: self.c_file,
            },
            report,
            config_log: self.config_log,
        }
    }
}

fn create_config(opts: Opts) -> RgConfResult<()> {
    let decoder = ToolDecoder::new(resolve_tool(&opts.lic_app)?, env!("CARGO_PKG_VERSION"));
    driver::run(&opts.invocation(), &BuiltinRules, &decoder)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let opts = Opts::parse();
    match create_config(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("create_config: {e:#}");
            ExitCode::FAILURE
        }
    }
}
