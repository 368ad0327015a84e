//! Conversions between `under_scored` and `camelCased` identifiers.

/// Transforms an `under_scored_string` into a `camelCasedOne`.
pub fn camelize(under_scored: &str) -> String {
    let mut camel = String::with_capacity(under_scored.len());
    for word in under_scored.split('_').filter(|word| !word.is_empty()) {
        let word = word.to_ascii_lowercase();
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            if camel.is_empty() {
                camel.push(head);
            } else {
                camel.push(head.to_ascii_uppercase());
            }
            camel.push_str(chars.as_str());
        }
    }
    camel
}

/// Transforms a `camelCasedString` into an `under_scored_one`.
///
/// Every ASCII upper case letter starts a new word. Other letters are kept as is.
pub fn underscore(camel_cased: &str) -> String {
    let mut words: Vec<String> = vec![];
    for c in camel_cased.chars() {
        if c.is_ascii_uppercase() || words.is_empty() {
            words.push(c.to_ascii_lowercase().to_string());
        } else if let Some(word) = words.last_mut() {
            word.push(c);
        }
    }
    words.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_camelizes() {
        assert_eq!(camelize("foo_bar"), "fooBar");
        assert_eq!(camelize("FOO_BAR_baz"), "fooBarBaz");
        assert_eq!(camelize("_leading__double_"), "leadingDouble");
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("ÉTAT_été"), "Étatété");
    }

    #[test]
    fn it_underscores() {
        assert_eq!(underscore("fooBar"), "foo_bar");
        assert_eq!(underscore("FooBarBaz"), "foo_bar_baz");
        assert_eq!(underscore("HTTPServer"), "h_t_t_p_server");
        assert_eq!(underscore("plain"), "plain");
        assert_eq!(underscore("fooÉtat"), "fooÉtat");
        assert_eq!(underscore("ÉtatFoo"), "État_foo");
        assert_eq!(underscore(""), "");
    }
}
