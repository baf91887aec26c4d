use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("DIST is not defined")]
    NoDistribution,

    #[error("{kind} isn't legal: {kind}={name}\nLegal options are: {legal}")]
    UnknownTarget {
        kind: &'static str,
        name: String,
        legal: String,
    },

    #[error("can't determine hw")]
    CannotDetermineHardware,

    #[error("no description available for HW={0}")]
    NoHardwareDescription(String),

    #[error("malformed feature override {0:?}, expected TOKEN=VALUE")]
    MalformedOverride(String),

    #[error("LIC and LICSTR make-flags can't be used together")]
    ConflictingLicenseSources,

    #[error(
        "a license key must be given either as a license file:\n  LIC=/path/to/mycompany.lic\nor directly as a string:\n  'LICSTR=1234567890.My Company'\nPlease send the following code when requesting a license: {hwid}"
    )]
    MissingLicense { hwid: String },

    #[error("invalid license file {0}")]
    InvalidLicenseFile(String),

    #[error("invalid license string")]
    InvalidLicense,

    #[error("license is invalid for this version")]
    IncompatibleLicenseVersion,
}
