// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `{start}{end}text` frame-indexed cues.
//!
//! Mirrors the original container-line/single-line grammar but drops the
//! non-destructive reconstruction machinery (`MdvdFormatting`, `to_data`)
//! a read-only demuxer has no use for.

use crate::demuxer::DemuxerState;
use crate::formats::common::replace_pipe_breaks;
use crate::line_buffer::LineBuffer;

const DEFAULT_US_PER_FRAME: i64 = 1_000_000 / 25;

fn parse_braced_int(s: &str) -> Option<(i64, &str)> {
    let s = s.strip_prefix('{')?;
    let end = s.find('}')?;
    let (digits, rest) = s.split_at(end);
    let rest = &rest[1..];
    if digits.is_empty() {
        return None;
    }
    let n: i64 = digits.parse().ok()?;
    Some((n, rest))
}

fn parse_line(line: &str) -> Option<(i64, i64, &str)> {
    let (start, rest) = parse_braced_int(line)?;
    let rest = rest.strip_prefix('{')?;
    let end = rest.find('}')?;
    let (digits, rest) = rest.split_at(end);
    let rest = &rest[1..];
    let stop = if digits.is_empty() {
        -1
    } else {
        digits.parse().ok()?
    };
    Some((start, stop, rest))
}

/// Parse a MicroDVD document, pushing every cue it contains into `state`.
///
/// A `{1}{1}<fps>` pseudo-cue updates `state.us_per_frame` (when the caller
/// passed no hint) instead of producing a visible cue — see the "Open
/// questions" note in SPEC_FULL.md on why this crate does not surface it as
/// subtitle text the way a literal port of the source would.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    if state.us_per_frame <= 0 {
        state.us_per_frame = DEFAULT_US_PER_FRAME;
    }

    while let Some(line) = lines.next() {
        let (start_frame, stop_frame, text) = match parse_line(line) {
            Some(v) => v,
            None => continue,
        };

        if start_frame == 1 && stop_frame == 1 {
            if let Ok(fps) = text.trim().parse::<f64>() {
                if fps > 0.0 {
                    state.us_per_frame = (1_000_000.0 / fps).round() as i64;
                }
            }
            continue;
        }

        let start_us = start_frame * state.us_per_frame;
        let stop_us = if stop_frame >= 0 {
            stop_frame * state.us_per_frame
        } else {
            -1
        };
        if stop_us >= 0 && start_us > stop_us {
            continue;
        }

        let text = replace_pipe_breaks(text);
        state.cues.push(crate::cue::Cue::new(start_us, stop_us, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demuxer::DemuxerState;

    fn fresh_state(us_per_frame: i64) -> DemuxerState {
        DemuxerState {
            us_per_frame,
            header: String::new(),
            cues: crate::cue::CueStore::with_capacity(4),
            jss: Default::default(),
            mpsub: Default::default(),
        }
    }

    #[test]
    fn fps_injection_sets_frame_duration_without_emitting_a_cue() {
        let mut lines = LineBuffer::load("{1}{1}25\n{25}{50}First|Second\n");
        let mut state = fresh_state(0);
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        assert_eq!(cues[0].text, "First\nSecond");
    }

    #[test]
    fn unbounded_stop_frame() {
        let mut lines = LineBuffer::load("{10}{}text\n");
        let mut state = fresh_state(40_000);
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues[0].stop_us, -1);
    }
}
