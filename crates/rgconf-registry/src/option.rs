use std::fmt;
use std::panic::Location;

use derive_more::Display;
use rgconf_util::number::is_number_value;

use crate::errors::Mismatch;

/// Who wrote an option's current value, in increasing order of strength.
///
/// A writer can only replace a value written at the same or a lower priority. Options without a
/// value start out at [`SetPriority::Init`] so that any writer may fill them.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SetPriority {
    /// Value came from the default table.
    #[default]
    #[display("default")]
    Init,
    /// `token_set_default()`
    #[display("token_set_default")]
    TokenSetDefault,
    /// `token_set()` and friends, including `enable_module()`
    #[display("token_set")]
    TokenSet,
    #[display("command line")]
    CommandLine,
}

/// Source location of a write. Diagnostics only; never consulted for resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub file: &'static str,
    pub line: u32,
}

impl Provenance {
    /// Writes that came from `-f TOKEN=VALUE`.
    pub const COMMAND_LINE: Provenance = Provenance {
        file: "command line",
        line: 0,
    };

    /// The location of the outermost caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Provenance {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file)
        } else {
            write!(f, "{}:{}", self.file, self.line)
        }
    }
}

/// Independent tags on an option. Several of them routinely co-occur, e.g. a licensed module
/// shown in the feature report is `module + major_feature + hardware`.
///
/// The tags decide which values are legal (see [`OptionKind::check_value`]) and which output
/// artifacts receive the option.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct OptionKind {
    /// May be `m`, expanding to `TOKEN_MODULE`/`TOKEN_FEATURE` macros.
    pub module_expand: bool,
    /// `m` is linked statically while developer mode is on.
    pub static_on_develop: bool,
    pub no_strip: bool,
    pub major_feature: bool,
    pub strip_on_y: bool,
    pub theme: bool,
    pub module: bool,
    pub hardware: bool,
    /// `#define TOKEN` in the header.
    pub emit_header_raw: bool,
    /// `#define cTOKEN` plus an `extern`/definition pair.
    pub emit_header_cooked: bool,
    pub emit_makefile: bool,
    /// Cannot be set from the command line.
    pub internal: bool,
    pub is_string: bool,
    /// A string when exported to C, quoted in the header.
    pub is_c_string: bool,
    pub is_number: bool,
    /// `export TOKEN=...` in the makefile fragment.
    pub exported: bool,
}

impl OptionKind {
    pub const NONE: OptionKind = OptionKind {
        module_expand: false,
        static_on_develop: false,
        no_strip: false,
        major_feature: false,
        strip_on_y: false,
        theme: false,
        module: false,
        hardware: false,
        emit_header_raw: false,
        emit_header_cooked: false,
        emit_makefile: false,
        internal: false,
        is_string: false,
        is_c_string: false,
        is_number: false,
        exported: false,
    };

    pub fn is_stringish(&self) -> bool {
        self.is_string || self.is_c_string
    }

    /// Checks `value` against the grammar implied by the tags: numbers must be decimal or `0x` hex,
    /// module options take `y`/`m`/`n`, and anything that is not a number, string or module is a
    /// plain `y`/`n` boolean. The empty string is always accepted.
    pub fn check_value(&self, value: &str) -> Result<(), Mismatch> {
        if self.is_number && !is_number_value(value) {
            return Err(Mismatch::NotNumeric(value.to_string()));
        }

        if self.module || self.module_expand {
            if !matches!(value, "" | "n" | "y" | "m") {
                return Err(Mismatch::NotTristate(value.to_string()));
            }
        } else if !self.is_number && !self.is_stringish() && !matches!(value, "" | "n" | "y") {
            return Err(Mismatch::NotBoolean(value.to_string()));
        }

        Ok(())
    }

    /// Whether the option shows up in the feature report at all.
    pub fn is_reportable(&self) -> bool {
        self.major_feature || self.module || self.hardware
    }
}

/// One configuration token and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    pub token: String,
    pub value: Option<String>,
    pub kind: OptionKind,
    pub description: Option<String>,
    /// `None` until the first write after construction.
    pub provenance: Option<Provenance>,
    pub priority: SetPriority,
}

impl ConfigOption {
    pub fn new<T: Into<String>>(token: T, kind: OptionKind) -> Self {
        ConfigOption {
            token: token.into(),
            value: None,
            kind,
            description: None,
            provenance: None,
            priority: SetPriority::Init,
        }
    }

    pub fn with_value<V: Into<String>>(self, value: V) -> Self {
        ConfigOption {
            value: Some(value.into()),
            ..self
        }
    }

    pub fn with_description<D: Into<String>>(self, description: D) -> Self {
        ConfigOption {
            description: Some(description.into()),
            ..self
        }
    }

    /// `y` and `m` are true; anything else, including no value, is false.
    pub fn is_truthy(&self) -> bool {
        matches!(self.value.as_deref(), Some("y" | "m"))
    }

    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn set_by_command_line(&self) -> bool {
        self.priority == SetPriority::CommandLine
    }

    /// `TOKEN=value (where)`, used when reporting a bad value.
    pub fn describe_assignment(&self) -> String {
        let value = self.value.as_deref().unwrap_or_default();
        if self.set_by_command_line() {
            format!("{}={} (set by command line)", self.token, value)
        } else if let Some(at) = &self.provenance {
            format!("{}={} ({})", self.token, value, at)
        } else {
            format!("{}={} (default)", self.token, value)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kind;

    #[test]
    fn priorities_are_ordered() {
        assert!(SetPriority::Init < SetPriority::TokenSetDefault);
        assert!(SetPriority::TokenSetDefault < SetPriority::TokenSet);
        assert!(SetPriority::TokenSet < SetPriority::CommandLine);
    }

    #[test]
    fn value_grammar() {
        assert_eq!(OptionKind::NONE.check_value("y"), Ok(()));
        assert_eq!(
            OptionKind::NONE.check_value("m"),
            Err(Mismatch::NotBoolean("m".into()))
        );
        assert_eq!(kind!(module_expand).check_value("m"), Ok(()));
        assert_eq!(
            kind!(module).check_value("yes"),
            Err(Mismatch::NotTristate("yes".into()))
        );
        assert_eq!(kind!(is_number).check_value("0x20"), Ok(()));
        assert_eq!(
            kind!(is_number).check_value("notanumber"),
            Err(Mismatch::NotNumeric("notanumber".into()))
        );
        assert_eq!(kind!(is_c_string).check_value("\"anything\""), Ok(()));
        assert_eq!(kind!(is_string).check_value(""), Ok(()));
    }

    #[test]
    fn caller_location() {
        let here = Provenance::caller();
        assert!(here.file.ends_with("option.rs"));
        assert!(here.line > 0);
        assert_eq!(Provenance::COMMAND_LINE.to_string(), "command line");
    }
}
