//! Counted nouns for log lines.

/// `"s"` unless `n` is exactly one.
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(3, "badge")` -> `"3 badges"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "badge"), "0 badges");
        assert_eq!(plural_count(1, "badge"), "1 badge");
        assert_eq!(plural_count(276, "badge"), "276 badges");
    }
}
