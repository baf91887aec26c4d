use std::fmt::{self, Write};

use rgconf_util::escape::c_escape;

/// The `config_strings[]` table: every option with a value worth looking up at runtime.
#[derive(Debug, Default)]
pub(crate) struct StringTable {
    entries: Vec<(String, String)>,
}

impl StringTable {
    /// Empty values and a literal `0` are skipped.
    pub fn push(&mut self, token: &str, value: Option<&str>) {
        match value {
            None | Some("") | Some("0") => {}
            Some(v) => self.entries.push((token.to_string(), c_escape(v))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn write(&self, c: &mut String) -> fmt::Result {
        writeln!(c)?;
        writeln!(c, "config_value_t config_strings[] = {{")?;
        for (token, value) in &self.entries {
            writeln!(c, "    {{\"{token}\", \"{value}\"}},")?;
        }
        writeln!(c, "    {{NULL, NULL}}")?;
        writeln!(c, "}};")?;
        writeln!(c)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::StringTable;

    #[test]
    fn skips_empty_and_zero() {
        let mut table = StringTable::default();
        table.push("CONFIG_A", Some("y"));
        table.push("CONFIG_B", Some("0"));
        table.push("CONFIG_C", Some(""));
        table.push("CONFIG_D", None);
        table.push("CONFIG_E", Some("say \"hi\"\n"));
        assert_eq!(table.len(), 2);

        let mut c = String::new();
        table.write(&mut c).unwrap();
        assert_eq!(
            c,
            "\nconfig_value_t config_strings[] = {\n    {\"CONFIG_A\", \"y\"},\n    {\"CONFIG_E\", \"say \\\"hi\\\"\\n\"},\n    {NULL, NULL}\n};\n\n"
        );
    }
}
