// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted id source.

use std::collections::VecDeque;

use hyperdpo_core::IdSource;

/// Replays a fixed list of tokens, then falls back to a counter.
///
/// Useful for forcing fresh-id collisions in the pushout builder.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIds {
    script: VecDeque<String>,
    fallback: u64,
    drawn: usize,
}

impl ScriptedIds {
    /// Source that yields `tokens` first, in order.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: tokens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Total number of tokens handed out.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl IdSource for ScriptedIds {
    fn next_token(&mut self) -> String {
        self.drawn += 1;
        self.script.pop_front().unwrap_or_else(|| {
            let token = format!("s{}", self.fallback);
            self.fallback += 1;
            token
        })
    }
}
