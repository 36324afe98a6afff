// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fresh identifier generation for vertices and edges created by a rewrite.
//!
//! There is no process-wide generator. Callers own an [`IdSource`] for the
//! duration of a call and pass it into every step, so runs are repeatable.
use crate::error::InternalError;
use crate::hypergraph::Hypergraph;
use crate::ident::{EdgeId, VertexId};

/// Upper bound on tokens drawn while looking for one unused identifier.
pub const MAX_FRESH_ATTEMPTS: usize = 1024;

/// Source of raw tokens for fresh identifiers.
///
/// Tokens need not be globally unique; the pushout builder skips any token
/// whose identifier is already taken in the graph under construction.
pub trait IdSource {
    /// Returns the next token.
    fn next_token(&mut self) -> String;
}

/// Call-scoped monotonic counter (`0`, `1`, `2`, ...).
///
/// # Invariants
/// - The counter wraps at `u64::MAX`; collisions after wrapping are caught by
///   the taken-id check in the pushout builder.
#[derive(Debug, Clone, Default)]
pub struct CounterIds {
    next: u64,
}

impl CounterIds {
    /// Starts counting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

impl IdSource for CounterIds {
    fn next_token(&mut self) -> String {
        let token = self.next;
        self.next = self.next.wrapping_add(1);
        token.to_string()
    }
}

/// Seeded `xoroshiro128+` generator producing 8-hex-digit tokens.
///
/// * Not cryptographically secure.
/// * Matching seeds yield identical token sequences across platforms.
#[derive(Debug, Clone, Copy)]
pub struct SeededIds {
    state: [u64; 2],
}

impl SeededIds {
    /// Constructs a generator from a single 64-bit seed via SplitMix64 expansion.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let mut state = [splitmix64(&mut sm_state), splitmix64(&mut sm_state)];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }
}

impl IdSource for SeededIds {
    fn next_token(&mut self) -> String {
        // High bits of xoroshiro128+ have the best statistical quality.
        format!("{:08x}", self.next_u64() >> 32)
    }
}

/// Draws a vertex id (`new_v<token>`) not yet present in `target`.
pub(crate) fn fresh_vertex(
    ids: &mut dyn IdSource,
    target: &Hypergraph,
) -> Result<VertexId, InternalError> {
    for _ in 0..MAX_FRESH_ATTEMPTS {
        let candidate = VertexId::new(format!("new_v{}", ids.next_token()));
        if !target.contains_vertex(&candidate) {
            return Ok(candidate);
        }
    }
    Err(InternalError::FreshIdExhausted {
        attempts: MAX_FRESH_ATTEMPTS,
    })
}

/// Draws an edge id (`new_e<token>`) not yet present in `target`.
pub(crate) fn fresh_edge(
    ids: &mut dyn IdSource,
    target: &Hypergraph,
) -> Result<EdgeId, InternalError> {
    for _ in 0..MAX_FRESH_ATTEMPTS {
        let candidate = EdgeId::new(format!("new_e{}", ids.next_token()));
        if !target.contains_edge(&candidate) {
            return Ok(candidate);
        }
    }
    Err(InternalError::FreshIdExhausted {
        attempts: MAX_FRESH_ATTEMPTS,
    })
}
