// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! AQTitle: `-->> <n>` starts a cue; body lines accumulate until the next
//! marker (put back) or end of input. Always unbounded.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

fn parse_marker(line: &str) -> Option<i64> {
    let rest = line.trim_start().strip_prefix("-->> ")?;
    rest.trim().parse().ok()
}

/// Parse an AQTitle document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let start_us = match parse_marker(line) {
            Some(v) => v,
            None => continue,
        };

        let mut text = String::new();
        loop {
            match lines.next() {
                Some(next_line) => {
                    if parse_marker(next_line).is_some() {
                        lines.putback();
                        break;
                    }
                    if !next_line.is_empty() {
                        text.push_str(next_line);
                        text.push('\n');
                    }
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
    fn parses_two_cues() {
        let mut lines = LineBuffer::load("-->> 1\nHello\nworld\n-->> 2\nBye\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Hello\nworld\n");
        assert_eq!(cues[1].text, "Bye\n");
        assert_eq!(cues[0].stop_us, -1);
    }
}
