// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! WebVTT (`WEBVTT` header, `-->`-separated timings with optional hours) and
//! SBV (`HH:MM:SS.mmm,HH:MM:SS.mmm`, no arrow). Share the same
//! "skip to timing, accumulate body until blank" skeleton as SubRip/SubViewer.

use crate::demuxer::DemuxerState;
use crate::formats::common::parse_timed_text_block;
use crate::line_buffer::LineBuffer;

/// Parses `MM:SS.mmm` or `HH:MM:SS.mmm` into microseconds.
fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    let (hms, frac) = match s.find('.') {
        Some(idx) => (&s[..idx], &s[idx + 1..]),
        None => (s, ""),
    };
    let parts: Vec<&str> = hms.split(':').collect();
    let (h, m, sec) = match parts.len() {
        2 => (0, parts[0].trim().parse().ok()?, parts[1].trim().parse().ok()?),
        3 => (
            parts[0].trim().parse().ok()?,
            parts[1].trim().parse().ok()?,
            parts[2].trim().parse().ok()?,
        ),
        _ => return None,
    };
    let ms: i64 = if frac.is_empty() {
        0
    } else {
        let digits: String = frac.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        let truncated = if digits.len() >= 3 { &digits[..3] } else { &digits[..] };
        let mut v: i64 = truncated.parse().ok()?;
        for _ in 0..(3 - truncated.len()) {
            v *= 10;
        }
        v
    };
    let h: i64 = h;
    let m: i64 = m;
    let sec: i64 = sec;
    Some(((h * 3600 + m * 60 + sec) * 1000 + ms) * 1000)
}

fn parse_vtt_timing_line(line: &str) -> Option<(i64, i64)> {
    let idx = line.find("-->")?;
    let start = parse_timestamp(&line[..idx])?;
    let tail = &line[idx + 3..];
    let end_field = tail.split_whitespace().next()?;
    let stop = parse_timestamp(end_field)?;
    Some((start, stop))
}

fn parse_sbv_timing_line(line: &str) -> Option<(i64, i64)> {
    let idx = line.find(',')?;
    let start = parse_timestamp(&line[..idx])?;
    let stop = parse_timestamp(&line[idx + 1..])?;
    Some((start, stop))
}

/// Parse a WebVTT document, pushing every cue it contains into `state`. The
/// leading `WEBVTT` header line and any following metadata are simply
/// skipped by the "advance until a timing line parses" rule.
pub fn parse_vtt(lines: &mut LineBuffer, state: &mut DemuxerState) {
    parse_timed_text_block(lines, state, parse_vtt_timing_line, |s| s.to_string());
}

/// Parse an SBV document, pushing every cue it contains into `state`.
pub fn parse_sbv(lines: &mut LineBuffer, state: &mut DemuxerState) {
    parse_timed_text_block(lines, state, parse_sbv_timing_line, |s| s.to_string());
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
    fn parses_vtt_with_mixed_timestamp_widths() {
        let mut lines = LineBuffer::load("WEBVTT\n\n00:01.000 --> 00:00:02.000\nHi\n");
        let mut state = fresh_state();
        parse_vtt(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        assert_eq!(cues[0].text, "Hi\n");
    }

    #[test]
    fn parses_sbv() {
        let mut lines = LineBuffer::load("0:00:01.000,0:00:02.000\nHello\n\n");
        let mut state = fresh_state();
        parse_sbv(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
    }
}
