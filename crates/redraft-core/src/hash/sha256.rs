use sha2::{Digest, Sha256};

/// Hex digits kept from a digest when it names a drawing in a report.
const FINGERPRINT_LEN: usize = 16;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Short content identity: the leading hex digits of the SHA-256 digest.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut digest = sha256_hex(bytes);
    digest.truncate(FINGERPRINT_LEN);
    digest
}
