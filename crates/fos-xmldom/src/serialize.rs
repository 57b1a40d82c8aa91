//! Attribute value escaping

use std::fmt::Write;

/// Write `value` to `f`, replacing `<`, `>`, `&`, `'` and `"` with their
/// named character references. Everything else passes through unchanged.
pub fn escape_attribute_value(value: &str, f: &mut impl Write) -> std::fmt::Result {
    let mut next = 0;
    for (i, b) in value.bytes().enumerate() {
        let entity = match b {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' => "&amp;",
            b'\'' => "&apos;",
            b'"' => "&quot;",
            _ => continue,
        };
        f.write_str(&value[next..i])?;
        f.write_str(entity)?;
        next = i + 1;
    }
    f.write_str(&value[next..])
}

/// Write `name="escaped value"`
pub(crate) fn write_attribute(name: &str, value: &str, f: &mut impl Write) -> std::fmt::Result {
    f.write_str(name)?;
    f.write_str("=\"")?;
    escape_attribute_value(value, f)?;
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(value: &str) -> String {
        let mut out = String::new();
        escape_attribute_value(value, &mut out).unwrap();
        out
    }

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escaped(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escaped("plain"), "plain");
        assert_eq!(escaped(""), "");
        assert_eq!(escaped("tab\there ünïcødé\n"), "tab\there ünïcødé\n");
    }

    #[test]
    fn test_write_attribute() {
        let mut out = String::new();
        write_attribute("a:id", "1 < 2", &mut out).unwrap();
        assert_eq!(out, "a:id=\"1 &lt; 2\"");
    }
}
