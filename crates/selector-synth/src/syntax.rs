//! Quoting and escaping for emitted CSS and XPath text

/// Double-quoted CSS string.
pub(crate) fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// CSS identifier, escaped so that `#{ident}` parses as a single id.
pub(crate) fn css_ident(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (index, c) in value.chars().enumerate() {
        let leading_digit = c.is_ascii_digit()
            && (index == 0 || (index == 1 && value.starts_with('-')));
        if leading_digit {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// `name="value"` attribute predicate.
pub(crate) fn attr_eq(name: &str, value: &str) -> String {
    format!("[{}={}]", name, css_string(value))
}

/// XPath string literal, using `concat()` when both quote kinds occur.
pub(crate) fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// First `max` characters, on a char boundary.
pub(crate) fn prefix_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

/// Regex source matching `text` literally.
pub(crate) fn literal_pattern(text: &str) -> String {
    regex::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string_escapes_quotes() {
        assert_eq!(css_string("Close"), "\"Close\"");
        assert_eq!(css_string("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_css_ident() {
        assert_eq!(css_ident("submit-btn"), "submit-btn");
        assert_eq!(css_ident("1st"), "\\31 st");
        assert_eq!(css_ident("a:b"), "a\\:b");
    }

    #[test]
    fn test_xpath_literal() {
        assert_eq!(xpath_literal("plain"), "'plain'");
        assert_eq!(xpath_literal("it's"), "\"it's\"");
        assert_eq!(
            xpath_literal("it's \"x\""),
            "concat('it', \"'\", 's \"x\"')"
        );
    }

    #[test]
    fn test_prefix_chars_respects_boundaries() {
        assert_eq!(prefix_chars("héllo wörld", 7), "héllo w");
        assert_eq!(prefix_chars("abc", 10), "abc");
    }
}
