/// Password to seed conversion
use crate::error::SeedError;

/// Password alphabet; a character's index is its 6-bit value
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Bits emitted per password character
pub const BITS_PER_CHAR: usize = 6;

/// Turn a password into a '0'/'1' seed string, 6 bits per character, MSB first
pub fn password_to_seed(password: &str) -> Result<String, SeedError> {
    let mut seed = String::with_capacity(password.len() * BITS_PER_CHAR);

    for (index, ch) in password.chars().enumerate() {
        let value = ALPHABET
            .find(ch)
            .ok_or(SeedError::InvalidChar { ch, index })?;
        seed.push_str(&format!("{:0width$b}", value, width = BITS_PER_CHAR));
    }

    Ok(seed)
}
