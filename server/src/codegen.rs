use rand::Rng;

/// Length of every short code handed out by the store.
pub const CODE_LENGTH: usize = 6;

/// 62-character alphabet short codes are drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random 6-character alphanumeric candidate.
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
/// Nothing is remembered between calls, so the result is *not* guaranteed to
/// be unique; the store is responsible for rejecting collisions.
pub fn generate_candidate() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Return `true` if `code` has the shape of a generated short code.
pub fn is_short_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
