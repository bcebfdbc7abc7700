/// Joins text fragments into a single line.
///
/// Every fragment is trimmed, empty fragments are dropped and the rest are
/// joined with a single space, keeping the order in which they were rendered.
///
/// # Arguments
///
/// * `fragments`: The text nodes of an element, in document order.
///
/// # Returns
///
/// * `String`: The normalized text, empty if no fragment carried any text.
///
/// # Example
///
/// ```
/// let text = join_stripped(["\n 지수 ", "476", "  "].into_iter());
/// assert_eq!(text, "지수 476");
/// ```
pub fn join_stripped<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 以空白切成 token，保留原本的順序
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Removes every leading and trailing occurrence of the given characters.
///
/// # Example
///
/// ```
/// assert_eq!(strip_chars("(+0.21%)", &['(', ')']), "+0.21%");
/// ```
pub fn strip_chars<'a>(s: &'a str, chars: &[char]) -> &'a str {
    s.trim_matches(|c| chars.contains(&c))
}

/// 是否同時包含所有指定的字元
pub fn contains_all(s: &str, chars: &[char]) -> bool {
    chars.iter().all(|c| s.contains(*c))
}
