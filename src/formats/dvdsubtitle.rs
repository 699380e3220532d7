// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! DVDSubtitle: `{T H:M:S:cs` opens a cue; body lines accumulate until a
//! line consisting solely of `}`.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

fn parse_open_line(line: &str) -> Option<i64> {
    let line = line.trim_start().strip_prefix("{T ")?;
    let parts: Vec<&str> = line.splitn(4, ':').collect();
    if parts.len() != 4 {
        return None;
    }
    let h: i64 = parts[0].trim().parse().ok()?;
    let m: i64 = parts[1].trim().parse().ok()?;
    let s: i64 = parts[2].trim().parse().ok()?;
    let cs: i64 = parts[3].trim().parse().ok()?;
    Some(((h * 3600 + m * 60 + s) * 100 + cs) * 10_000)
}

/// Parse a DVDSubtitle document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let start_us = match parse_open_line(line) {
            Some(v) => v,
            None => continue,
        };

        let mut text = String::new();
        loop {
            match lines.next() {
                Some(body_line) if body_line.trim() == "}" => break,
                Some(body_line) => {
                    text.push_str(body_line);
                    text.push('\n');
                }
                None => break,
            }
        }

        state.cues.push(Cue::new(start_us, -1, text));
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
    fn parses_cue_body_until_closing_brace() {
        let mut lines = LineBuffer::load("{T 0:0:1:0\nHello\nworld\n}\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, -1);
        assert_eq!(cues[0].text, "Hello\nworld\n");
    }
}
