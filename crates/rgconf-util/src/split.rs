pub fn split_filter_empty<'a>(input: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    input.split(separator).filter(|v| !v.is_empty())
}

/// Splits a `TOKEN=value` assignment at the first `=`.
///
/// The value is everything after the first `=`, so it may itself contain `=`. Returns `None` for
/// the value when there is no `=` at all.
///
/// # Example
///
/// ```
/// use rgconf_util::split::split_assignment;
/// assert_eq!(split_assignment("CONFIG_A=y"), ("CONFIG_A", Some("y")));
/// assert_eq!(split_assignment("CFLAGS=-DX=1"), ("CFLAGS", Some("-DX=1")));
/// assert_eq!(split_assignment("CONFIG_A"), ("CONFIG_A", None));
/// ```
pub fn split_assignment(input: &str) -> (&str, Option<&str>) {
    match input.split_once('=') {
        Some((token, value)) => (token, Some(value)),
        None => (input, None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filter_empty() {
        let parts: Vec<_> = split_filter_empty("1  5 17 ", " ").collect();
        assert_eq!(parts, vec!["1", "5", "17"]);
    }

    #[test]
    fn assignment_with_empty_value() {
        assert_eq!(split_assignment("CONFIG_A="), ("CONFIG_A", Some("")));
    }
}
