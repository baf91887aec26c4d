//! Turning `LIC`/`LICSTR` into the set of licensed features.
//!
//! Decoding the license itself is left to an external tool behind [`LicenseDecoder`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, bail};
use rgconf_registry::license::FeatureId;
use rgconf_registry::LicenseState;
use rgconf_util::split::split_filter_empty;
use tracing::{debug, info};

use crate::RgConfResult;
use crate::context::ConfigContext;
use crate::errors::ContextError;
use crate::rules::Rules;

/// Reported when the hardware id cannot be obtained.
const FALLBACK_HWID: &str = "0042aa";

pub trait LicenseDecoder {
    /// Identifies this build host, for license requests.
    fn hardware_id(&self) -> RgConfResult<String>;

    /// The license string stored in a license file.
    fn read_license_file(&self, path: &str) -> RgConfResult<String>;

    /// Feature ids the license enables.
    fn features(&self, license: &str) -> RgConfResult<Vec<FeatureId>>;

    /// Whether the license is valid for this version.
    fn is_valid_for_version(&self, license: &str) -> RgConfResult<bool>;

    fn is_evaluation(&self, license: &str) -> RgConfResult<bool>;
}

/// Runs the license tool, one subcommand per question.
#[derive(Debug, Clone)]
pub struct ToolDecoder {
    app: PathBuf,
    version: String,
}

impl ToolDecoder {
    pub fn new<P: Into<PathBuf>, V: Into<String>>(app: P, version: V) -> Self {
        ToolDecoder {
            app: app.into(),
            version: version.into(),
        }
    }

    fn run(&self, args: &[&str]) -> RgConfResult<String> {
        debug!(app = %self.app.display(), ?args, "running license tool");
        let output = Command::new(&self.app)
            .args(args)
            .output()
            .with_context(|| format!("can't run {}", self.app.display()))?;

        if !output.status.success() {
            bail!(
                "{} {} failed: {}",
                self.app.display(),
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl LicenseDecoder for ToolDecoder {
    fn hardware_id(&self) -> RgConfResult<String> {
        Ok(self.run(&["getid"])?.trim().to_string())
    }

    fn read_license_file(&self, path: &str) -> RgConfResult<String> {
        self.run(&["readlic", path])
    }

    fn features(&self, license: &str) -> RgConfResult<Vec<FeatureId>> {
        let out = self.run(&["info", "--features_only", license])?;
        split_filter_empty(out.trim(), " ")
            .map(|id| {
                id.parse::<FeatureId>()
                    .with_context(|| format!("bad feature id {id:?}"))
            })
            .collect()
    }

    fn is_valid_for_version(&self, license: &str) -> RgConfResult<bool> {
        Ok(self.run(&["ver", &self.version, license]).is_ok())
    }

    fn is_evaluation(&self, license: &str) -> RgConfResult<bool> {
        Ok(self.run(&["eval", license])?.starts_with("evaluation license"))
    }
}

/// A decoder that knows a fixed set of license files and strings.
#[derive(Debug, Clone, Default)]
pub struct StaticDecoder {
    pub hwid: Option<String>,
    /// License file path to the license string it holds.
    pub files: HashMap<String, String>,
    /// License string to its features.
    pub licenses: HashMap<String, Vec<FeatureId>>,
    pub evaluation: bool,
    pub version_ok: bool,
}

impl LicenseDecoder for StaticDecoder {
    fn hardware_id(&self) -> RgConfResult<String> {
        self.hwid.clone().context("no hardware id")
    }

    fn read_license_file(&self, path: &str) -> RgConfResult<String> {
        self.files
            .get(path)
            .cloned()
            .with_context(|| format!("no such license file {path}"))
    }

    fn features(&self, license: &str) -> RgConfResult<Vec<FeatureId>> {
        self.licenses
            .get(license)
            .cloned()
            .with_context(|| format!("unknown license {license:?}"))
    }

    fn is_valid_for_version(&self, _license: &str) -> RgConfResult<bool> {
        Ok(self.version_ok)
    }

    fn is_evaluation(&self, _license: &str) -> RgConfResult<bool> {
        Ok(self.evaluation)
    }
}

/// Decodes the license named by `LIC` or given in `LICSTR` and installs it in the gate.
///
/// `LIC=n` turns license checking off. When a license is in force, `LIC_AUTOCONF` defaults to `y`.
pub fn license_init<R, D>(ctx: &mut ConfigContext, rules: &R, decoder: &D) -> RgConfResult<()>
where
    R: Rules + ?Sized,
    D: LicenseDecoder + ?Sized,
{
    let file = non_empty(ctx.token_get_str("LIC")?);
    let string = non_empty(ctx.token_get_str("LICSTR")?);

    let license = match (file, string) {
        (Some(_), Some(_)) => bail!(ContextError::ConflictingLicenseSources),
        (None, Some(string)) => string,
        (file, None) => {
            let file = match file.or_else(|| rules.default_license(ctx)) {
                Some(file) => file,
                None => {
                    let hwid = decoder
                        .hardware_id()
                        .ok()
                        .filter(|id| !id.is_empty())
                        .unwrap_or_else(|| FALLBACK_HWID.to_string());
                    bail!(ContextError::MissingLicense { hwid });
                }
            };

            if file.eq_ignore_ascii_case("n") {
                info!("License checking is disabled");
                ctx.set_license(LicenseState::unchecked());
                return Ok(());
            }

            let contents = decoder
                .read_license_file(&file)
                .context(ContextError::InvalidLicenseFile(file.clone()))?;
            let string = contents.lines().next().unwrap_or_default().trim().to_string();
            ctx.token_set("LICSTR", &string)?;
            string
        }
    };

    let features = decoder
        .features(&license)
        .context(ContextError::InvalidLicense)?;
    if !decoder.is_valid_for_version(&license)? {
        bail!(ContextError::IncompatibleLicenseVersion);
    }
    let evaluation = decoder.is_evaluation(&license)?;

    info!(
        "License enables {} features{}",
        features.len(),
        if evaluation { " (evaluation)" } else { "" }
    );
    ctx.set_license(LicenseState {
        evaluation,
        ..LicenseState::with_features(features)
    });

    let auto = ctx.gate().policy().auto_disable_token;
    if !ctx.token_get(auto)? {
        ctx.token_set_y(auto)?;
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
