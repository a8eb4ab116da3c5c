//! `entropy` generates random identifiers
//!
//! Bytes come from the operating system CSPRNG. When it can't be used, the identifier is
//! derived from a fresh UUID v4 instead, and the caller can observe which source was used.
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use rst_common::standard::uuid::Uuid;
use rst_common::with_logging::log::warn;

use crate::connect::types::ConnectError;

/// `ByteSource` fills a buffer with random bytes
pub trait ByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ConnectError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemByteSource;

impl ByteSource for SystemByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ConnectError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| ConnectError::EntropyError(err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropySource {
    System,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomString {
    pub value: String,
    pub source: EntropySource,
}

pub fn random_string(length: usize) -> RandomString {
    random_string_with(&mut SystemByteSource, length)
}

/// `random_string_with` builds a lowercase hex string of exactly `length` characters
pub fn random_string_with<TSource: ByteSource>(source: &mut TSource, length: usize) -> RandomString {
    let mut buf = vec![0u8; length.div_ceil(2)];

    match source.fill(&mut buf) {
        Ok(_) => {
            let mut value = hex::encode(buf);
            value.truncate(length);

            RandomString {
                value,
                source: EntropySource::System,
            }
        }
        Err(err) => {
            warn!("[entropy:random_string] primary source failed: {}", err);
            RandomString {
                value: fallback_string(length),
                source: EntropySource::Fallback,
            }
        }
    }
}

fn fallback_string(length: usize) -> String {
    let mut value = String::new();

    // one digest only gives 64 chars
    while value.len() < length {
        let digest = Sha256::digest(Uuid::new_v4().to_string().as_bytes());
        value.push_str(&hex::encode(digest));
    }

    value.truncate(length);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSource;

    impl ByteSource for BrokenSource {
        fn fill(&mut self, _: &mut [u8]) -> Result<(), ConnectError> {
            Err(ConnectError::EntropyError("no entropy".to_string()))
        }
    }

    fn is_hex(value: &str) -> bool {
        value.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase())
    }

    #[test]
    fn test_random_string_from_system() {
        for length in [0, 1, 7, 32] {
            let out = random_string(length);
            assert_eq!(out.source, EntropySource::System);
            assert_eq!(out.value.len(), length);
            assert!(is_hex(&out.value));
        }
    }

    #[test]
    fn test_random_string_differs() {
        assert_ne!(random_string(32).value, random_string(32).value);
    }

    #[test]
    fn test_random_string_fallback() {
        let out = random_string_with(&mut BrokenSource, 12);
        assert_eq!(out.source, EntropySource::Fallback);
        assert_eq!(out.value.len(), 12);
        assert!(is_hex(&out.value));

        let long = random_string_with(&mut BrokenSource, 100);
        assert_eq!(long.value.len(), 100);
    }
}
