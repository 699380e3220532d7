// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Subviewer 1: `*** START SCRIPT` header, a bare `[H:M:S]` timing line, the
//! text on the following line, then an optional bare `[H:M:S]` stop line.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

fn parse_bare_bracket_hms(line: &str) -> Option<i64> {
    let line = line.trim();
    let line = line.strip_prefix('[')?;
    let line = line.strip_suffix(']')?;
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let s: i64 = parts[2].parse().ok()?;
    Some((h * 3600 + m * 60 + s) * 1_000_000)
}

/// Parse a Subviewer 1 document, pushing every cue it contains into `state`.
///
/// The text buffer is always initialized before the loop even considers
/// emitting a cue — unlike the original C demuxer, which can leave its text
/// buffer uninitialized if a timing line matches but the following text line
/// does not exist (see SPEC_FULL.md §9, preserved-behavior note).
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let start_us = match parse_bare_bracket_hms(line) {
            Some(v) => v,
            None => continue,
        };

        let text = match lines.next() {
            Some(t) => t.to_string(),
            None => return,
        };

        let mut stop_us = -1;
        if let Some(next_line) = lines.next() {
            match parse_bare_bracket_hms(next_line) {
                Some(t) => stop_us = t,
                None => lines.putback(),
            }
        }

        if stop_us >= 0 && start_us > stop_us {
            continue;
        }

        state.cues.push(Cue::new(start_us, stop_us, text));
    }
}
