use rgconf_registry::ConfigOption;

use crate::errors::EmitError;

/// Checks the option's value against the grammar its tags imply. Unset options always pass.
pub fn check_option(option: &ConfigOption) -> Result<(), EmitError> {
    let Some(value) = option.value.as_deref() else {
        return Ok(());
    };

    option
        .kind
        .check_value(value)
        .map_err(|mismatch| EmitError::InvalidValue {
            assignment: option.describe_assignment(),
            mismatch,
        })
}

/// Which artifacts an option goes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Targets {
    pub header: bool,
    pub makefile: bool,
}

impl Targets {
    /// An option tagged for neither artifact goes to both.
    pub fn of(option: &ConfigOption) -> Self {
        let kind = &option.kind;
        let print_all = !(kind.emit_header_raw || kind.emit_header_cooked || kind.emit_makefile);
        Targets {
            header: kind.emit_header_raw || kind.emit_header_cooked || print_all,
            makefile: kind.emit_makefile || print_all,
        }
    }
}
