// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The uniform cue representation every format parser normalizes into.

/// A single timed subtitle entry, normalized from whatever format it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Start time in microseconds, always `>= 0`.
    pub start_us: i64,

    /// Stop time in microseconds, or `-1` if the format left it unbounded.
    pub stop_us: i64,

    /// Cue payload, `\n`-separated, never containing `\r`.
    pub text: String,
}

impl Cue {
    /// Construct a new cue.
    pub fn new(start_us: i64, stop_us: i64, text: String) -> Cue {
        Cue {
            start_us,
            stop_us,
            text,
        }
    }
}

/// Accumulates cues during a parse and produces the final, sorted cue list.
#[derive(Debug, Clone, Default)]
pub struct CueStore {
    cues: Vec<Cue>,
}

impl CueStore {
    /// Create an empty store, pre-sized for the expected number of cues.
    pub fn with_capacity(cap: usize) -> CueStore {
        CueStore {
            cues: Vec::with_capacity(cap),
        }
    }

    /// Append a cue to the store.
    pub fn push(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    /// Number of cues currently held.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the store holds no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Sort cues by start time (stable, so ties keep insertion order) and
    /// return the finished list.
    pub fn finalize(mut self) -> Vec<Cue> {
        self.cues.sort_by_key(|c| c.start_us);
        self.cues
    }
}

/// Total duration spanned by a finalized cue list, in microseconds.
///
/// Returns `0` for an empty list. If the last cue's `stop_us` is unbounded
/// (`-1`), the length is reported as one microsecond past its start, mirroring
/// the "at least visible for an instant" convention used elsewhere in this crate.
pub fn total_length_us(cues: &[Cue]) -> i64 {
    match cues.last() {
        None => 0,
        Some(last) => {
            if last.stop_us < 0 {
                last.start_us + 1
            } else {
                last.stop_us
            }
        }
    }
}
