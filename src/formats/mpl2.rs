// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! MPL2: `[start][end]text` in tenths of a second, with a leading italic `/`
//! stripped.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::formats::common::replace_pipe_breaks;
use crate::line_buffer::LineBuffer;

const US_PER_TENTH_SEC: i64 = 100_000;

fn parse_bracketed_int(s: &str) -> Option<(i64, &str)> {
    let s = s.strip_prefix('[')?;
    let idx = s.find(']')?;
    let (digits, rest) = s.split_at(idx);
    let rest = &rest[1..];
    let n: i64 = digits.parse().ok()?;
    Some((n, rest))
}

fn parse_line(line: &str) -> Option<(i64, i64, &str)> {
    let (start, rest) = parse_bracketed_int(line)?;
    let (stop, rest) = parse_bracketed_int(rest)?;
    Some((start, stop, rest))
}

/// Parse an MPL2 document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (start_frame, stop_frame, text) = match parse_line(line) {
            Some(v) => v,
            None => continue,
        };
        if start_frame > stop_frame {
            continue;
        }
        let text = text.strip_prefix('/').unwrap_or(text);
        let text = replace_pipe_breaks(text);
        state.cues.push(Cue::new(
            start_frame * US_PER_TENTH_SEC,
            stop_frame * US_PER_TENTH_SEC,
            text,
        ));
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
    fn parses_cue() {
        let mut lines = LineBuffer::load("[10][25]Line A|Line B\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_500_000);
        assert_eq!(cues[0].text, "Line A\nLine B");
    }

    #[test]
    fn strips_leading_italic_slash() {
        let mut lines = LineBuffer::load("[0][10]/italic text\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues[0].text, "italic text");
    }
}
