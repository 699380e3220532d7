// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! PowerDivx (PSB): `{H:M:S}{H:M:S}text`.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::formats::common::replace_pipe_breaks;
use crate::line_buffer::LineBuffer;

fn parse_braced_hms(s: &str) -> Option<(i64, &str)> {
    let s = s.strip_prefix('{')?;
    let idx = s.find('}')?;
    let (hms, rest) = s.split_at(idx);
    let rest = &rest[1..];
    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let s2: i64 = parts[2].parse().ok()?;
    Some(((h * 3600 + m * 60 + s2) * 1_000_000, rest))
}

/// Parse a PSB document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (start_us, rest) = match parse_braced_hms(line) {
            Some(v) => v,
            None => continue,
        };
        let (stop_us, text) = match parse_braced_hms(rest) {
            Some(v) => v,
            None => continue,
        };
        if start_us > stop_us {
            continue;
        }
        state.cues.push(Cue::new(start_us, stop_us, replace_pipe_breaks(text)));
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
        let mut lines = LineBuffer::load("{0:0:1}{0:0:2}Hi|there\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        assert_eq!(cues[0].text, "Hi\nthere");
    }
}
