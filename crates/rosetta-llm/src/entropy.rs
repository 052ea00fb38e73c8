//! Identifier and clock sources for responses synthesized without vendor ids

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Source of synthesized identifiers and timestamps
///
/// Implementations must be stateless from the caller's point of view: the
/// same instance is shared across concurrent conversions.
pub trait ResponseEntropy: Send + Sync {
    /// Identifier for a synthesized tool call
    fn call_id(&self) -> String;

    /// Identifier for a synthesized response
    fn response_id(&self) -> String;

    /// Current time in epoch milliseconds
    fn now_millis(&self) -> u64;
}

/// Random identifiers and the wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl ResponseEntropy for SystemEntropy {
    fn call_id(&self) -> String {
        format!("call_{}", random_suffix())
    }

    fn response_id(&self) -> String {
        format!("gen-{}", random_suffix())
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Lowercase base-36 suffix
fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..ID_SUFFIX_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}
