// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Top-level orchestration: probe the input, drive the matching parser to
//! completion, and hand back a finalized, queryable cue list.

use crate::cue::{total_length_us, Cue, CueStore};
use crate::errors::*;
use crate::formats::{self, FormatTag};
use crate::line_buffer::LineBuffer;
use crate::prober;
use crate::ttml;

/// Mutable state threaded through a single parse. A handful of formats need
/// to remember something across cues (MPSub's running offset, JacoSub's time
/// resolution/shift); everything else just appends to `cues`.
pub struct DemuxerState {
    /// Microseconds per video frame, used by frame-indexed formats. May be
    /// updated mid-parse if MicroDVD inlines a `{1}{1}<fps>` pseudo-cue and
    /// the caller passed no hint.
    pub us_per_frame: i64,

    /// Free-form preamble text accumulated before the first real cue, for
    /// formats that carry one (SSA/ASS).
    pub header: String,

    /// Cues collected so far.
    pub cues: CueStore,

    /// JacoSub's directive-driven state.
    pub jss: JacoSubState,

    /// MPSub's cumulative-offset state.
    pub mpsub: MpSubState,
}

/// `#S[HIFT]`/`#T[IMERES]` directives and nested-comment tracking for JacoSub.
#[derive(Debug, Clone, Copy)]
pub struct JacoSubState {
    pub comment_depth: u32,
    pub time_resolution: i64,
    pub time_shift: i64,
    pub inited: bool,
}

impl Default for JacoSubState {
    fn default() -> JacoSubState {
        JacoSubState {
            comment_depth: 0,
            time_resolution: 30,
            time_shift: 0,
            inited: false,
        }
    }
}

/// Running accumulator for MPSub's relative-duration time encoding.
#[derive(Debug, Clone, Copy)]
pub struct MpSubState {
    pub cumulative: f64,
    pub factor: f64,
    pub inited: bool,
}

impl Default for MpSubState {
    fn default() -> MpSubState {
        MpSubState {
            cumulative: 0.0,
            factor: 1.0,
            inited: false,
        }
    }
}

impl DemuxerState {
    fn new(us_per_frame: i64, capacity_hint: usize) -> DemuxerState {
        DemuxerState {
            us_per_frame,
            header: String::new(),
            cues: CueStore::with_capacity(capacity_hint),
            jss: JacoSubState::default(),
            mpsub: MpSubState::default(),
        }
    }
}

/// A parsed, owned subtitle stream. Dropping it frees everything it owns;
/// there is no separate `close` call.
#[derive(Debug, Clone)]
pub struct Handle {
    format: FormatTag,
    cues: Vec<Cue>,
}

impl Handle {
    /// Parse `input_text` (a complete, already-decoded subtitle document) and
    /// return a handle over its cues.
    ///
    /// `us_per_frame` is a hint used by frame-indexed formats (MicroDVD); pass
    /// `0` to let the format parser attempt auto-detection where it can.
    pub fn open(input_text: &str, us_per_frame: i64) -> Result<Handle> {
        let (_bom, text) = crate::formats::common::split_bom(input_text);

        let tag = prober::probe(text);
        if tag == FormatTag::Unknown {
            return Err(ErrorKind::UnknownFormat.into());
        }

        let cues = if tag == FormatTag::Ttml {
            ttml::parse(text)?
        } else {
            let mut lines = LineBuffer::load(text);
            let mut state = DemuxerState::new(us_per_frame, lines.len());
            formats::parse_into(tag, &mut lines, &mut state);
            state.cues.finalize()
        };

        if cues.is_empty() {
            return Err(ErrorKind::EmptyResult.into());
        }

        Ok(Handle { format: tag, cues })
    }

    /// Total duration spanned by the cue list, in microseconds.
    pub fn length_us(&self) -> i64 {
        total_length_us(&self.cues)
    }

    /// Number of cues.
    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }

    /// Cue at `index`, if any.
    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    /// All cues, sorted by start time.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The format this handle was recognized and parsed as.
    pub fn format_name(&self) -> &'static str {
        self.format.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_minimal_subrip() {
        let input = "1\n00:00:01,000 --> 00:00:02,500\nHello\n\n";
        let h = Handle::open(input, 0).unwrap();
        assert_eq!(h.format_name(), "SubRIP");
        assert_eq!(h.cue_count(), 1);
        assert_eq!(h.cue(0).unwrap().start_us, 1_000_000);
        assert_eq!(h.cue(0).unwrap().stop_us, 2_500_000);
    }

    #[test]
    fn rejects_unknown_format() {
        let input = "random text\nno timings here\n";
        assert!(Handle::open(input, 0).is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(Handle::open("", 0).is_err());
    }
}
