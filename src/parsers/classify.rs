//! Value classification for data-row tokens.

/// Check whether a token is a raw bit pattern.
///
/// A token is binary when its distinct characters are exactly `{0, 1}`,
/// `{0}` or `{1}`. Single-digit readings like `"1"` are therefore treated as
/// bit patterns too.
pub fn is_binary(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '0' | '1'))
}
