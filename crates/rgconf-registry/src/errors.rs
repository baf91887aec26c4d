use thiserror::Error;

use crate::license::FeatureId;
use crate::option::Provenance;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    #[error("is a string option and cannot be read as a boolean")]
    StringAsBoolean,

    #[error("is a string option and cannot be read as a number")]
    StringAsNumber,

    #[error("can't be set to \"m\", it is not module-expandable")]
    ModuleNotExpandable,

    #[error("must be numeric, got {0:?}")]
    NotNumeric(String),

    #[error("{0:?} does not fit in a 64-bit signed integer")]
    OutOfRange(String),

    #[error("must be 'y' or 'n', got {0:?}")]
    NotBoolean(String),

    #[error("must be 'y', 'm' or 'n', got {0:?}")]
    NotTristate(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{at}: no such option {token}")]
    UnknownToken { token: String, at: Provenance },

    #[error("{token} is duplicated")]
    DuplicateToken { token: String },

    #[error("{token} {mismatch}")]
    TypeMismatch { token: String, mismatch: Mismatch },

    #[error(
        "{at}: {token} is a module (mapped to license feature {feature}), use enable_module instead of token_set"
    )]
    ModuleRequiresGate {
        token: String,
        feature: FeatureId,
        at: Provenance,
    },

    #[error(
        "{at}: {token} is not a module (not mapped to any license feature), use token_set instead of enable_module"
    )]
    NotAModule { token: String, at: Provenance },

    #[error("{at}: there is no valid license for {token}. {hint}")]
    UnlicensedFeature {
        token: String,
        at: Provenance,
        hint: String,
    },

    #[error("{force} and {auto} flags cannot co-exist")]
    ConflictingLicensePolicy { force: String, auto: String },

    #[error("{token}: internal option, cannot be set from the command line")]
    InternalToken { token: String },
}

pub type RegistryResult<T> = anyhow::Result<T>;
