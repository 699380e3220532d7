// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! PhoenixSub (PJS): `t1,t2,"text"`.
//!
//! The per-field multiplier is deliberately left at the FIXME-flagged value
//! from the original demuxer (`* 10` microseconds) rather than "fixed" to a
//! tenths-of-a-second interpretation — see SPEC_FULL.md §9.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

const PJS_TIME_UNIT_US: i64 = 10;

fn parse_line(line: &str) -> Option<(i64, i64, &str)> {
    let parts: Vec<&str> = line.splitn(3, ',').collect();
    if parts.len() != 3 {
        return None;
    }
    let t1: i64 = parts[0].trim().parse().ok()?;
    let t2: i64 = parts[1].trim().parse().ok()?;
    let mut text = parts[2].trim();
    text = text.strip_prefix('"').unwrap_or(text);
    text = text.strip_suffix('"').unwrap_or(text);
    Some((t1, t2, text))
}

/// Parse a PJS document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (t1, t2, text) = match parse_line(line) {
            Some(v) => v,
            None => continue,
        };
        if t1 > t2 {
            continue;
        }
        state.cues.push(Cue::new(t1 * PJS_TIME_UNIT_US, t2 * PJS_TIME_UNIT_US, text.to_string()));
    }
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
    fn parses_quoted_text() {
        let mut lines = LineBuffer::load("100,200,\"Hello\"\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1000);
        assert_eq!(cues[0].stop_us, 2000);
        assert_eq!(cues[0].text, "Hello");
    }
}
