//! UUID value generator.

use crate::source::RandomSource;
use fixture_core::{Producer, Value};
use rand::{Rng, RngCore};
use uuid::Uuid;

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_uuid_v4(rng: &mut dyn RngCore) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}

impl RandomSource {
    /// Random v4 UUIDs, reproducible when the source is seeded.
    pub fn uuid(&self) -> Producer {
        let source = self.clone();
        Producer::new(move || Value::Uuid(source.with_rng(generate_uuid_v4)))
    }
}
