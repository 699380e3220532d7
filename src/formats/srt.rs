// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `HH:MM:SS,mmm --> HH:MM:SS,mmm` cues, with an optional leading index line.
//!
//! Grounded on the FSM in the teacher's own `srt.rs` (`SrtParserState`,
//! `parse_timestamp`/`parse_timespan`), simplified since this demuxer only
//! ever reads a document once and never reconstructs it.

use crate::demuxer::DemuxerState;
use crate::formats::common::parse_timed_text_block;
use crate::line_buffer::LineBuffer;

/// Parses `H:MM:SS[,.]mmm`, with the milliseconds field optional, into
/// microseconds.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    let (hms, frac) = match s.find(|c| c == ',' || c == '.') {
        Some(idx) => (&s[..idx], &s[idx + 1..]),
        None => (s, ""),
    };
    let parts: Vec<&str> = hms.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].trim().parse().ok()?;
    let m: i64 = parts[1].trim().parse().ok()?;
    let sec: i64 = parts[2].trim().parse().ok()?;

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

    Some(((h * 3600 + m * 60 + sec) * 1000 + ms) * 1000)
}

fn parse_timing_line(line: &str) -> Option<(i64, i64)> {
    let idx = line.find("-->")?;
    let start = parse_timestamp(&line[..idx])?;
    let stop = parse_timestamp(&line[idx + 3..])?;
    Some((start, stop))
}

/// Parse a SubRip document, pushing every cue it contains into `state`.
/// Leading numeric index lines and blank lines before a timing line are
/// simply skipped — the loop keeps advancing until a timing line matches.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    parse_timed_text_block(lines, state, parse_timing_line, |s| s.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{Cue, CueStore};
    use crate::demuxer::DemuxerState;

    /// Test-only helper that re-emits a cue list as a SubRip document, for the
    /// round-trip property in SPEC_FULL.md §8. Not part of the public API —
    /// this crate is read-only per its Non-goals and never writes subtitles
    /// back out at runtime.
    fn to_subrip_string(cues: &[Cue]) -> String {
        fn fmt_timestamp(us: i64) -> String {
            let ms = us / 1000;
            let (h, rem) = (ms / 3_600_000, ms % 3_600_000);
            let (m, rem) = (rem / 60_000, rem % 60_000);
            let (s, ms) = (rem / 1000, rem % 1000);
            format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
        }

        let mut out = String::new();
        for (i, cue) in cues.iter().enumerate() {
            out.push_str(&(i + 1).to_string());
            out.push('\n');
            out.push_str(&fmt_timestamp(cue.start_us));
            out.push_str(" --> ");
            out.push_str(&fmt_timestamp(cue.stop_us));
            out.push('\n');
            out.push_str(&cue.text);
            out.push('\n');
        }
        out
    }

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
    fn parses_minimal_cue() {
        let mut lines = LineBuffer::load("1\n00:00:01,000 --> 00:00:02,500\nHello\n\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_500_000);
        assert_eq!(cues[0].text, "Hello\n");
    }

    #[test]
    fn skips_malformed_timing_and_recovers() {
        let mut lines = LineBuffer::load("garbage\n00:00:01.000 --> 00:00:02.000\nHi\n\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Hi\n");
    }

    #[test]
    fn rejects_start_after_stop() {
        let mut lines = LineBuffer::load("00:00:05,000 --> 00:00:01,000\nHi\n\n00:00:01,000 --> 00:00:02,000\nOk\n\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Ok\n");
    }

    #[test]
    fn handles_mixed_line_endings() {
        let mut lines = LineBuffer::load("1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\r\n\r\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn round_trip_through_subrip_string() {
        let input = "1\n00:00:01,000 --> 00:00:02,500\nHello\nthere\n\n2\n00:01:03,250 --> 00:01:04,000\nBye\n\n";
        let mut lines = LineBuffer::load(input);
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();

        let reemitted = to_subrip_string(&cues);
        let mut lines2 = LineBuffer::load(&reemitted);
        let mut state2 = fresh_state();
        parse(&mut lines2, &mut state2);
        let cues2 = state2.cues.finalize();

        assert_eq!(cues.len(), cues2.len());
        for (a, b) in cues.iter().zip(cues2.iter()) {
            assert_eq!(a.start_us, b.start_us);
            assert_eq!(a.stop_us, b.stop_us);
            assert_eq!(a.text.trim(), b.text.trim());
        }
    }
}
