//! Chirp body validation and banned-word substitution.
//!
//! Pure and deterministic: the same body always produces the same result and
//! no store interaction happens here.

use crate::error::{DomainError, DomainResult};

/// Maximum chirp body length in bytes, measured on the raw body as received.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Replacement for a banned token.
const CENSOR: &str = "****";

/// Tokens removed from chirp bodies, matched case-insensitively as whole
/// space-delimited words.
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Validate a chirp body and censor banned words.
///
/// Fails with a validation error when the body exceeds
/// [`MAX_CHIRP_LENGTH`] bytes. Otherwise splits on the literal space
/// character only — consecutive spaces yield empty tokens and survive the
/// rejoin, and other whitespace passes through untouched — and replaces each
/// token whose lowercased form equals a banned word with `****`.
pub fn clean_body(body: &str) -> DomainResult<String> {
    if body.len() > MAX_CHIRP_LENGTH {
        return Err(DomainError::validation("Chirp is too long"));
    }

    let cleaned = body
        .split(' ')
        .map(|word| {
            if BANNED_WORDS.contains(&word.to_lowercase().as_str()) {
                CENSOR
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(cleaned)
}
