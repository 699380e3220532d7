// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! RealText: `<time begin="T" [end="T"] ...>text`, body lines accumulate
//! until the next `<time` tag or a `<clear/>` marker.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

/// Flexible time literal parser: tries, in order, `H:M:S.f`, `M:S.f`, `S.f`,
/// `M:S`, `S`. `f` is interpreted as hundredths of a second.
fn parse_flexible_time(s: &str) -> Option<i64> {
    let s = s.trim();
    let (whole, frac) = match s.find('.') {
        Some(idx) => (&s[..idx], &s[idx + 1..]),
        None => (s, ""),
    };
    let parts: Vec<i64> = whole.split(':').map(|p| p.trim().parse::<i64>()).collect::<Result<_, _>>().ok()?;
    let secs_total = match parts.len() {
        1 => parts[0],
        2 => parts[0] * 60 + parts[1],
        3 => parts[0] * 3600 + parts[1] * 60 + parts[2],
        _ => return None,
    };
    let hundredths: i64 = if frac.is_empty() {
        0
    } else {
        let digits: String = frac.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            0
        } else {
            let truncated = if digits.len() >= 2 { &digits[..2] } else { &digits[..] };
            let mut v: i64 = truncated.parse().ok()?;
            if truncated.len() == 1 {
                v *= 10;
            }
            v
        }
    };
    Some(secs_total * 1_000_000 + hundredths * 10_000)
}

fn find_attr(tag: &str, name: &str) -> Option<String> {
    let needle = format!("{}=", name);
    let idx = tag.to_ascii_lowercase().find(&needle.to_ascii_lowercase())?;
    let rest = &tag[idx + needle.len()..];
    let rest = rest.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

fn parse_time_tag(line: &str) -> Option<(i64, i64, &str)> {
    let lower = line.to_ascii_lowercase();
    let start_idx = lower.find("<time")?;
    let tag_end = line[start_idx..].find('>')? + start_idx;
    let tag = &line[start_idx..=tag_end];
    let rest = &line[tag_end + 1..];

    let begin = find_attr(tag, "begin")?;
    let begin_us = parse_flexible_time(&begin)?;
    let stop_us = match find_attr(tag, "end") {
        Some(end) => parse_flexible_time(&end).unwrap_or(-1),
        None => -1,
    };
    Some((begin_us, stop_us, rest))
}

fn is_boundary(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("<time") || lower.contains("<clear")
}

/// Parse a RealText document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let (start_us, stop_us, first_rest) = match parse_time_tag(line) {
            Some(v) => v,
            None => continue,
        };

        let mut text = String::new();
        if !first_rest.trim().is_empty() {
            text.push_str(first_rest);
            text.push('\n');
        }
        loop {
            match lines.next() {
                Some(next_line) => {
                    if is_boundary(next_line) {
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
    fn parses_cue_with_begin_and_end() {
        let mut lines = LineBuffer::load("<time begin=\"1\" end=\"2\">Hello\nworld\n<time begin=\"3\">Bye\n");
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_000_000);
        assert_eq!(cues[0].text, "Hello\nworld\n");
        assert_eq!(cues[1].stop_us, -1);
    }
}
