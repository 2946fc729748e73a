//! Identifier generation for new shortlinks.

use uuid::{Builder, Uuid};

/// Generates a fresh random identifier.
///
/// Draws 16 bytes from the operating system's CSPRNG via `getrandom` and
/// stamps them as a version 4 UUID (122 random bits). No uniqueness check
/// is made here; the storage primary key rejects the rare collision.
///
/// # Errors
///
/// Returns an error if the system random number generator is unavailable.
pub fn generate_id() -> Result<Uuid, getrandom::Error> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)?;

    Ok(Builder::from_random_bytes(bytes).into_uuid())
}
