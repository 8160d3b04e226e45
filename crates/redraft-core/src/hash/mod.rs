mod sha256;

pub use sha256::{fingerprint, sha256_hex};
