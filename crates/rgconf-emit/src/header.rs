//! `#define`s for the C header, plus the `vc*` definitions that back cooked options at runtime.

use std::fmt::{self, Write};

use rgconf_registry::ConfigOption;

const MODULE_EXPANSION: &str = "_MODULE";
const FEATURE_EXPANSION: &str = "_FEATURE";

/// Writes the provenance comment once, right before the first line an option produces.
struct Reference<'a> {
    option: &'a ConfigOption,
    printed: bool,
}

impl Reference<'_> {
    fn print(&mut self, h: &mut String) -> fmt::Result {
        if self.printed {
            return Ok(());
        }
        self.printed = true;

        if self.option.set_by_command_line() {
            writeln!(h, "/* Set by command line */")
        } else if let Some(at) = &self.option.provenance {
            writeln!(h, "/* {at} */")
        } else {
            writeln!(h)
        }
    }
}

pub(crate) fn write_option(h: &mut String, c: &mut String, option: &ConfigOption) -> fmt::Result {
    let kind = &option.kind;
    let token = option.token.as_str();
    let value = option.value.as_deref();
    let quote = if kind.is_c_string { "\"" } else { "" };
    let is_y_m = kind.module || kind.module_expand || !(kind.is_number || kind.is_stringish());
    let mut reference = Reference {
        option,
        printed: false,
    };

    if kind.emit_header_cooked {
        let (c_type, cooked) = if kind.is_stringish() {
            let cooked = match value {
                Some(v) => format!("{quote}{v}{quote}"),
                None => "NULL".to_string(),
            };
            ("char *", cooked)
        } else if kind.is_number {
            ("int ", value.unwrap_or("0").to_string())
        } else {
            let on = if option.is_truthy() { "1" } else { "0" };
            ("int ", on.to_string())
        };

        reference.print(h)?;
        writeln!(h, "#define c{token} {cooked}")?;
        writeln!(h, "extern {c_type}vc{token};")?;
        writeln!(c, "{c_type}vc{token} = {cooked};")?;
    }

    if !kind.module_expand {
        let raw = match value {
            Some(_) if is_y_m => option.is_truthy().then_some("1"),
            other => other,
        };
        if let Some(raw) = raw {
            reference.print(h)?;
            writeln!(h, "#define {token} {quote}{raw}{quote}")?;
        }
        return Ok(());
    }

    let on = u8::from(option.is_truthy());
    reference.print(h)?;
    writeln!(h, "#define c{token}{FEATURE_EXPANSION} {on}")?;
    writeln!(h, "extern int vc{token}{FEATURE_EXPANSION};")?;
    writeln!(c, "int vc{token}{FEATURE_EXPANSION} = {on};")?;

    if on == 0 {
        return Ok(());
    }

    writeln!(h, "#define {token}{FEATURE_EXPANSION} 1")?;
    let suffix = if value == Some("m") {
        MODULE_EXPANSION
    } else {
        ""
    };
    writeln!(h, "#define {token}{suffix} 1")
}
