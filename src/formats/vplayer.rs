// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! VPlayer: `H:M:S<sep>text`, where `sep` is any single non-digit character.
//! Always unbounded (`stop_us = -1`): the format carries no end time.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::formats::common::replace_pipe_breaks;
use crate::line_buffer::LineBuffer;

fn parse_line(line: &str) -> Option<(i64, &str)> {
    let mut parts = line.splitn(3, ':');
    let h: i64 = parts.next()?.trim().parse().ok()?;
    let m: i64 = parts.next()?.trim().parse().ok()?;
    // The third field is "S<sep>text": digits for the seconds, then a single
    // non-digit separator (colon, space, or anything else), then the text.
    let rest = parts.next()?;
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let s: i64 = rest[..end].parse().ok()?;
    let mut chars = rest[end..].chars();
    chars.next()?;
    let text = chars.as_str();
    Some(((h * 3600 + m * 60 + s) * 1_000_000, text))
}

/// Parse a VPlayer document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (start_us, text) = match parse_line(line) {
            Some(v) => v,
            None => continue,
        };
        state.cues.push(Cue::new(start_us, -1, replace_pipe_breaks(text)));
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
    fn parses_cue_with_colon_separator() {
        let mut lines = LineBuffer::load("0:0:1:Hello|world\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, -1);
        assert_eq!(cues[0].text, "Hello\nworld");
    }

    #[test]
    fn parses_cue_with_space_separator() {
        let mut lines = LineBuffer::load("0:0:1 Hello world\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, -1);
        assert_eq!(cues[0].text, "Hello world");
    }
}
