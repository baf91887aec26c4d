use std::fmt::{self, Write};

use rgconf_registry::ConfigOption;

/// Falsy booleans are left out, unless the command line turned them off: then make has to be
/// told, so that nothing further down can turn them back on.
pub(crate) fn write_option(mk: &mut String, option: &ConfigOption) -> fmt::Result {
    let kind = &option.kind;
    let token = option.token.as_str();
    let export = if kind.exported { "export " } else { "" };

    if !option.is_truthy() && !(kind.is_stringish() || kind.is_number) {
        if option.set_by_command_line() {
            writeln!(mk, "# Disabled by command line")?;
            writeln!(mk, "override {token}=")?;
            if kind.exported {
                writeln!(mk, "export {token}")?;
            }
        }
        return Ok(());
    }

    let Some(value) = option.value.as_deref() else {
        return Ok(());
    };

    if option.set_by_command_line() {
        writeln!(mk, "# Set by command line:")?;
    } else if let Some(at) = &option.provenance {
        writeln!(mk, "# {at}")?;
    } else {
        writeln!(mk, "# default")?;
    }
    writeln!(mk, "{export}{token}={value}")
}
