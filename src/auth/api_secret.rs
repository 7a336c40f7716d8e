use subtle::ConstantTimeEq;

/// Compares a presented token with the configured secret in constant time.
///
/// Only the length leaks; the position of the first differing byte does not.
pub fn secret_matches(token: &str, secret: &str) -> bool {
    bool::from(token.as_bytes().ct_eq(secret.as_bytes()))
}
