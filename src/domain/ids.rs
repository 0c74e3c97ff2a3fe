//! Record identifier generation.

/// Number of random bytes behind each identifier.
const ID_BYTES: usize = 12;

/// Generates a fresh 24-character lowercase hex identifier.
pub fn object_id() -> String {
    let bytes: [u8; ID_BYTES] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
