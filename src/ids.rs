//! Short identifiers linking triggers to their panels.
//!
//! Identifiers are four lowercase base-36 characters. [`RandomIds`] draws them
//! uniformly and never checks for collisions, so two items on one page can in
//! principle receive the same id (1 in 1,679,616 per pair).

use rand::Rng;

/// Number of distinct 4-character base-36 identifiers.
const ID_SPACE: u32 = 36 * 36 * 36 * 36;

/// Source of short identifiers.
pub trait IdGenerator {
    /// Produce the next identifier.
    fn next_id(&mut self) -> String;
}

/// Random identifiers from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        encode(rand::thread_rng().gen_range(0..ID_SPACE))
    }
}

/// Deterministic identifiers `0001`, `0002`, ... wrapping after `zzzz`.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next = (self.next + 1) % ID_SPACE;
        encode(self.next)
    }
}

/// Encode `value` (taken modulo the id space) as 4 zero-padded base-36 digits.
pub fn encode(value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut value = value % ID_SPACE;
    let mut out = [b'0'; 4];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    out.iter().map(|&b| b as char).collect()
}
