use std::sync::LazyLock;

use anyhow::bail;
use regex::Regex;
use rgconf_registry::{
    LicenseGate, LicenseState, ModuleOutcome, Provenance, Registry, SetOutcome, SetPriority,
};
use rgconf_util::split::split_assignment;
use tracing::debug;

use crate::RgConfResult;
use crate::errors::ContextError;
use crate::jpkg::JpkgDist;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// The distribution, hardware and OS a pass is resolving for. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub dist: String,
    pub hw: String,
    pub os: String,
}

/// Tokens the driver writes to describe the target itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTokens {
    pub dist: &'static str,
    pub hw: &'static str,
    pub hw_description: &'static str,
    pub os: &'static str,
    /// Set on every JPKG clone.
    pub jpkg: &'static str,
    /// Set when there is no hardware at all.
    pub local_targets_only: &'static str,
}

impl Default for TargetTokens {
    fn default() -> Self {
        TargetTokens {
            dist: "CONFIG_RG_DIST",
            hw: "CONFIG_RG_HW",
            hw_description: "CONFIG_RG_HW_DESC_STR",
            os: "CONFIG_RG_OS",
            jpkg: "CONFIG_RG_JPKG",
            local_targets_only: "CONFIG_RG_BUILD_LOCAL_TARGETS_ONLY",
        }
    }
}

/// Everything a rule pass may read or write.
///
/// The `token_*` methods are what rules call. They record the caller's location as provenance,
/// and the plain writers refuse tokens that are licensed modules: those go through
/// [`ConfigContext::enable_module`].
#[derive(Debug, Clone)]
pub struct ConfigContext {
    pub(crate) registry: Registry,
    /// The default table as it was before anything touched it. JPKG clones start from here.
    pub(crate) base: Registry,
    pub(crate) gate: LicenseGate,
    pub(crate) target: Target,
    pub(crate) tokens: TargetTokens,
    pub(crate) jpkg: Vec<JpkgDist>,
}

impl ConfigContext {
    pub fn new(registry: Registry) -> Self {
        ConfigContext {
            base: registry.clone(),
            registry,
            gate: LicenseGate::default(),
            target: Target::default(),
            tokens: TargetTokens::default(),
            jpkg: Vec::new(),
        }
    }

    pub fn with_target(self, target: Target) -> Self {
        ConfigContext { target, ..self }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn gate(&self) -> &LicenseGate {
        &self.gate
    }

    pub fn set_license(&mut self, state: LicenseState) {
        self.gate = LicenseGate::new(state).with_policy(self.gate.policy().clone());
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut Target {
        &mut self.target
    }

    pub fn tokens(&self) -> &TargetTokens {
        &self.tokens
    }

    /// Names registered with [`ConfigContext::register_distribution`], in order.
    pub fn jpkg_distributions(&self) -> impl Iterator<Item = &str> {
        self.jpkg.iter().map(|d| d.name.as_str())
    }

    /// Queues `name` as a JPKG sub-target, resolved against a fresh copy of the default table.
    pub fn register_distribution(&mut self, name: &str) {
        debug!(name, "registering JPKG distribution");
        self.jpkg.push(JpkgDist::new(name, self.base.clone()));
    }

    /// Applies one `TOKEN=VALUE` command-line override.
    pub fn apply_command_line(&mut self, assignment: &str) -> RgConfResult<SetOutcome> {
        let (token, value) = split_assignment(assignment);
        if !TOKEN_REGEX.is_match(token) {
            bail!(ContextError::MalformedOverride(assignment.to_string()));
        }
        self.registry.set_command_line(token, value.unwrap_or_default())
    }

    #[track_caller]
    fn plain_write(
        &mut self,
        token: &str,
        value: &str,
        priority: SetPriority,
    ) -> RgConfResult<SetOutcome> {
        let at = Provenance::caller();
        self.gate.check_plain_write(token, at)?;
        self.registry.set(token, value, priority, at)
    }

    #[track_caller]
    pub fn token_set(&mut self, token: &str, value: &str) -> RgConfResult<SetOutcome> {
        self.plain_write(token, value, SetPriority::TokenSet)
    }

    #[track_caller]
    pub fn token_set_default(&mut self, token: &str, value: &str) -> RgConfResult<SetOutcome> {
        self.plain_write(token, value, SetPriority::TokenSetDefault)
    }

    #[track_caller]
    pub fn token_set_y(&mut self, token: &str) -> RgConfResult<SetOutcome> {
        self.plain_write(token, "y", SetPriority::TokenSet)
    }

    /// `m`, or `y` when the target OS cannot load modules.
    #[track_caller]
    pub fn token_set_m(&mut self, token: &str) -> RgConfResult<SetOutcome> {
        let at = Provenance::caller();
        self.gate.check_plain_write(token, at)?;
        self.registry.set_m(token, at)
    }

    #[track_caller]
    pub fn enable_module(&mut self, token: &str) -> RgConfResult<ModuleOutcome> {
        self.gate
            .enable_module(&mut self.registry, token, Provenance::caller())
    }

    #[track_caller]
    pub fn token_get(&self, token: &str) -> RgConfResult<bool> {
        self.registry.get_bool(token)
    }

    #[track_caller]
    pub fn token_is_y(&self, token: &str) -> RgConfResult<bool> {
        self.registry.is_y(token)
    }

    #[track_caller]
    pub fn token_get_str(&self, token: &str) -> RgConfResult<&str> {
        self.registry.get_or_empty(token)
    }

    #[track_caller]
    pub fn token_get_number(&self, token: &str) -> RgConfResult<i64> {
        self.registry.get_number(token)
    }

    #[track_caller]
    pub fn set_big_endian(&mut self, is_big: bool) -> RgConfResult<()> {
        if is_big {
            self.token_set_y("CONFIG_CPU_BIG_ENDIAN")?;
            self.token_set("TARGET_ENDIANESS", "BIG")?;
        } else {
            self.token_set_y("CONFIG_CPU_LITTLE_ENDIAN")?;
            self.token_set("TARGET_ENDIANESS", "LITTLE")?;
        }
        Ok(())
    }
}
