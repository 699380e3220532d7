// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! MPSub: a `FORMAT=...` header selects the per-field scale factor; cue
//! lines hold two relative float offsets that advance a running cumulative
//! clock.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

fn parse_two_floats(line: &str) -> Option<(f64, f64)> {
    let mut it = line.split_whitespace();
    let a: f64 = it.next()?.parse().ok()?;
    let b: f64 = it.next()?.parse().ok()?;
    Some((a, b))
}

/// Parse an MPSub document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        if let Some(rest) = line.trim_start().strip_prefix("FORMAT=") {
            state.mpsub.factor = if rest.trim().eq_ignore_ascii_case("TIME") {
                100.0
            } else {
                1.0
            };
            state.mpsub.inited = true;
            continue;
        }

        let (d_start, d_stop) = match parse_two_floats(line) {
            Some(v) => v,
            None => continue,
        };
        if !state.mpsub.inited {
            state.mpsub.factor = 1.0;
            state.mpsub.inited = true;
        }

        state.mpsub.cumulative += d_start * state.mpsub.factor;
        let start_us = (state.mpsub.cumulative * 10_000.0).round() as i64;
        state.mpsub.cumulative += d_stop * state.mpsub.factor;
        let stop_us = (state.mpsub.cumulative * 10_000.0).round() as i64;

        let mut text = String::new();
        loop {
            match lines.next() {
                Some(body_line) if !body_line.is_empty() => {
                    text.push_str(body_line);
                    text.push('\n');
                }
                _ => break,
            }
        }

        state.cues.push(Cue::new(start_us, stop_us, text));
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
    fn accumulates_cumulative_offset_with_time_factor() {
        let mut lines = LineBuffer::load("FORMAT=TIME\n1.0 1.0\nHello\n\n2.0 1.0\nWorld\n\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 2);
        // cumulative after first cue: 100 + 100 = 200 -> *10000 = 2_000_000
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        // second cue: +200 -> 400 (start), +100 -> 500 (stop)
        assert_eq!(cues[1].start_us, 4_000_000);
        assert_eq!(cues[1].stop_us, 5_000_000);
    }
}
