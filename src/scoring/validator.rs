//! Syntactic validation of Solana account addresses.
//!
//! This does not decode the address; it only filters out inputs that cannot
//! be a base58 public key so they never reach the network.

pub const MIN_ADDRESS_LEN: usize = 32;
pub const MAX_ADDRESS_LEN: usize = 44;

/// Whether `c` belongs to the base58 alphabet (no `0`, `O`, `I`, `l`).
fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Check that `address` looks like a Solana address.
pub fn is_valid_address(address: &str) -> bool {
    // Non-ASCII input fails the alphabet check anyway, so byte length is safe here
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len())
        && address.chars().all(is_base58_char)
}

/// Variant for optional input, as it arrives from a request body.
pub fn validate(address: Option<&str>) -> bool {
    address.map(is_valid_address).unwrap_or(false)
}
