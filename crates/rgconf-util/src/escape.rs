/// Escapes a value for use inside a C string literal.
///
/// Only the characters the generated tables can contain are handled: newline, carriage return,
/// tab, backslash and double quote.
pub fn c_escape(value: &str) -> String {
    let mut ret = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => ret.push_str("\\n"),
            '\r' => ret.push_str("\\r"),
            '\t' => ret.push_str("\\t"),
            '\\' | '"' => {
                ret.push('\\');
                ret.push(c);
            }
            _ => ret.push(c),
        }
    }
    ret
}
