/// Short version of a release string.
///
/// Keeps the leading dot-separated segments that start with an ASCII digit
/// and stops at the first segment that does not. Returns an empty string if
/// the first segment is not numeric.
///
/// Examples:
/// - "5.5.5.5" -> "5.5.5.5"
/// - "0.5.21.28.gae25b56" -> "0.5.21.28"
/// - "2013.2.b1" -> "2013.2"
pub fn short_version(release: &str) -> String {
    release
        .split('.')
        .take_while(|part| part.starts_with(|c: char| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(".")
}
