//! Length bounds for client-supplied text.

/// Maximum username length, in characters.
pub const MAX_USERNAME_CHARS: usize = 15;

/// Maximum chat body length, in characters.
pub const MAX_CHAT_CHARS: usize = 100;

/// Truncate `s` in place to at most `max` characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(s: &mut String, max: usize) {
    if let Some((byte_idx, _)) = s.char_indices().nth(max) {
        s.truncate(byte_idx);
    }
}
