// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! JacoSub: `H:M:S.f H:M:S.f TEXT` or `@f1 @f2 TEXT`, `#S[HIFT]`/`#T[IMERES]`
//! directives, trailing-backslash line continuation, and an inline markup
//! mini-language (`{...}` comments, `~` as a space, `\C`/`\F`/`\B`/`\I`/`\U`/`\D`/`\N`
//! escapes).

use crate::cue::Cue;
use crate::demuxer::{DemuxerState, JacoSubState};
use crate::line_buffer::LineBuffer;

fn take_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

fn parse_timing_token(tok: &str) -> Option<(i64, i64, i64, i64)> {
    if let Some(rest) = tok.strip_prefix('@') {
        let f: i64 = rest.parse().ok()?;
        return Some((0, 0, 0, f));
    }
    let parts: Vec<&str> = tok.split(|c| c == ':' || c == '.').collect();
    if parts.len() != 4 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let s: i64 = parts[2].parse().ok()?;
    let f: i64 = parts[3].parse().ok()?;
    Some((h, m, s, f))
}

fn timing_to_us(h: i64, m: i64, s: i64, f: i64, resolution: i64, shift: i64) -> i64 {
    let frames = (h * 3600 + m * 60 + s) * resolution + f + shift;
    (frames as f64 / resolution as f64 * 1_000_000.0).round() as i64
}

fn extract_first_int(s: &str) -> Option<i64> {
    let start = s.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let rest = &s[start..];
    let end = rest[1..].find(|c: char| !c.is_ascii_digit()).map(|i| i + 1).unwrap_or(rest.len());
    rest[..end].parse().ok()
}

fn apply_directive(line: &str, jss: &mut JacoSubState) {
    let body = &line[1..];
    let upper = body.trim_start().to_ascii_uppercase();
    if upper.starts_with('S') {
        if let Some(n) = extract_first_int(body) {
            jss.time_shift = n;
        }
    } else if upper.starts_with('T') {
        if let Some(n) = extract_first_int(body) {
            jss.time_resolution = n;
        }
    }
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for c in s.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

/// Strips JacoSub's `{...}` nested comments and resolves its escape sequences,
/// consuming `comment_depth` across calls so an unbalanced `{` correctly
/// suppresses text in a later cue too.
fn process_inline(text: &str, comment_depth: &mut u32) -> String {
    let mut out = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if *comment_depth > 0 {
            match c {
                '{' => *comment_depth += 1,
                '}' => *comment_depth = comment_depth.saturating_sub(1),
                _ => {}
            }
            continue;
        }
        match c {
            '{' => *comment_depth += 1,
            '}' => {}
            '~' => out.push(' '),
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('C') | Some('F') => {
                    chars.next();
                    chars.next();
                }
                Some('B') | Some('I') | Some('U') | Some('D') | Some('N') => {
                    chars.next();
                }
                Some('~') => out.push('~'),
                Some('{') => out.push('{'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            },
            _ => out.push(c),
        }
    }
    collapse_spaces(&out)
}

/// Parse a JacoSub document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with('#') {
            apply_directive(line.trim_start(), &mut state.jss);
            continue;
        }

        let (tok1, rest1) = take_token(line);
        let (tok2, rest2) = take_token(rest1);
        let (h1, m1, s1, f1) = match parse_timing_token(tok1) {
            Some(v) => v,
            None => continue,
        };
        let (h2, m2, s2, f2) = match parse_timing_token(tok2) {
            Some(v) => v,
            None => continue,
        };

        let resolution = state.jss.time_resolution;
        let shift = state.jss.time_shift;
        let start_us = timing_to_us(h1, m1, s1, f1, resolution, shift);
        let stop_us = timing_to_us(h2, m2, s2, f2, resolution, shift);
        if start_us > stop_us {
            continue;
        }

        let mut raw_text = rest2.trim_start().to_string();
        while raw_text.trim_end().ends_with('\\') {
            let trimmed_len = raw_text.trim_end().len();
            raw_text.truncate(trimmed_len - 1);
            match lines.next() {
                Some(next_line) => {
                    raw_text.push(' ');
                    raw_text.push_str(next_line);
                }
                None => break,
            }
        }

        let text = process_inline(&raw_text, &mut state.jss.comment_depth);
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
    fn parses_full_timing_cue() {
        let mut lines = LineBuffer::load("0:0:1.0 0:0:2.0 Hello~world\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        assert_eq!(cues[0].text, "Hello world");
    }

    #[test]
    fn parses_short_at_timing() {
        let mut lines = LineBuffer::load("@30 @60 frame based\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        // default resolution 30 -> 30 frames = 1s, 60 frames = 2s
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
    }

    #[test]
    fn strips_comments_and_continuation() {
        let mut lines = LineBuffer::load("0:0:1.0 0:0:2.0 Hello {comment} world\\\nmore text\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues[0].text, "Hello world more text");
    }
}
