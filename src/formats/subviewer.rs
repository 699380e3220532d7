// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SubViewer: `[INFORMATION]` header, `H:MM:SS.cc,H:MM:SS.cc` timing lines,
//! `[br]` line breaks.
//!
//! Shares its "skip to timing line, accumulate body until blank" skeleton
//! with SubRip (`formats::common::parse_timed_text_block`) per SPEC_FULL.md §4.4.

use crate::demuxer::DemuxerState;
use crate::formats::common::{parse_timed_text_block, replace_bracket_breaks};
use crate::line_buffer::LineBuffer;

/// Parses `H:MM:SS.cc` into microseconds, deliberately *not* scaling the `cc`
/// field by 10 — a preserved quirk of the original demuxer (see SPEC_FULL.md
/// §9, "open questions"), not a bug introduced here.
fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    let (hms, cc) = match s.find('.') {
        Some(idx) => (&s[..idx], &s[idx + 1..]),
        None => (s, "0"),
    };
    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].trim().parse().ok()?;
    let m: i64 = parts[1].trim().parse().ok()?;
    let sec: i64 = parts[2].trim().parse().ok()?;
    let cc: i64 = cc.trim().parse().ok()?;
    Some(((h * 3600 + m * 60 + sec) * 1000 + cc) * 1000)
}

fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let idx = line.find(',')?;
    let start = parse_timestamp(&line[..idx])?;
    let stop = parse_timestamp(&line[idx + 1..])?;
    Some((start, stop))
}

/// Parse a SubViewer document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    parse_timed_text_block(lines, state, parse_timing_line, |s| replace_bracket_breaks(s));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::CueStore;
    use crate::demuxer::DemuxerState;

    fn fresh_state() -> DemuxerState {
        DemuxerState {
            us_per_frame: 0,
            header: String::new(),
            cues: CueStore::with_capacity(4),
            jss: Default::default(),
            mpsub: Default::default(),
        }
    }

    #[test]
    fn parses_minimal_cue_with_br() {
        let mut lines = LineBuffer::load("[INFORMATION]\n[END INFORMATION]\n00:00:01.00,00:00:02.00\nLine1[br]Line2\n\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Line1\nLine2\n");
    }
}
