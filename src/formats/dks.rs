// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! DKS: `[H:M:S]text`, with an optional bare `[H:M:S]` line giving the stop
//! time and `[br]` line breaks.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::formats::common::replace_bracket_breaks;
use crate::line_buffer::LineBuffer;

fn parse_bracket_hms(line: &str) -> Option<(i64, &str)> {
    let line = line.strip_prefix('[')?;
    let idx = line.find(']')?;
    let (hms, rest) = line.split_at(idx);
    let rest = &rest[1..];
    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let s: i64 = parts[2].parse().ok()?;
    Some(((h * 3600 + m * 60 + s) * 1_000_000, rest))
}

/// Parse a DKS document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (start_us, text) = match parse_bracket_hms(line) {
            Some(v) => v,
            None => continue,
        };

        let mut stop_us = -1;
        if let Some(next_line) = lines.next() {
            match parse_bracket_hms(next_line) {
                Some((t, rest)) if rest.trim().is_empty() => stop_us = t,
                _ => lines.putback(),
            }
        }

        if stop_us >= 0 && start_us > stop_us {
            continue;
        }

        state.cues.push(Cue::new(start_us, stop_us, replace_bracket_breaks(text)));
    }
}
