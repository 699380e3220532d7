// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SAMI: SGML-like markup. A cue opens at `Start=<ms>`, its text starts after
//! the closing `>` of the following `<P ...>` tag, and runs until the next
//! `Start=` is seen (that line is put back for the next cue).
//!
//! This is a line-granular simplification of the original demuxer's
//! character-at-a-time scan — it requires `Start=` and the opening `<P ...>`
//! tag to share a line, which every SAMI file this crate has been grounded
//! against does in practice (`<SYNC Start=1000><P Class=EN>text`).

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

fn extract_int(s: &str) -> Option<i64> {
    let s = s.trim_start().trim_start_matches('"').trim_start_matches('\'');
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        s[..end].parse().ok()
    }
}

fn strip_tags_keep_br(s: &str) -> String {
    let mut out = String::new();
    let mut rest = s;
    loop {
        match rest.find('<') {
            Some(idx) => {
                out.push_str(&rest[..idx]);
                let after = &rest[idx + 1..];
                match after.find('>') {
                    Some(gt) => {
                        let tag = &after[..gt];
                        if tag.to_ascii_lowercase().starts_with("br") {
                            out.push('\n');
                        }
                        rest = &after[gt + 1..];
                    }
                    None => return out,
                }
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

fn clean_sami_text(s: &str) -> String {
    strip_tags_keep_br(s).replace("&nbsp;", " ").replace('\t', " ")
}

/// Parse a SAMI document, pushing every cue it contains into `state`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState) {
    while let Some(line) = lines.next() {
        let start_idx = match find_ci(line, "Start=") {
            Some(i) => i,
            None => continue,
        };
        let start_ms = match extract_int(&line[start_idx + "Start=".len()..]) {
            Some(v) => v,
            None => continue,
        };
        let start_us = start_ms * 1000;

        let p_idx = match find_ci(line, "<P") {
            Some(i) => i,
            None => continue,
        };
        let gt_off = match line[p_idx..].find('>') {
            Some(o) => o,
            None => continue,
        };
        let mut current = line[p_idx + gt_off + 1..].to_string();

        let mut text = String::new();
        loop {
            if let Some(sidx) = find_ci(&current, "Start=") {
                if !current[..sidx].trim().is_empty() {
                    text.push_str(&clean_sami_text(&current[..sidx]));
                }
                lines.putback();
                break;
            }
            text.push_str(&clean_sami_text(&current));
            match lines.next() {
                Some(next_line) => {
                    text.push('\n');
                    current = next_line.to_string();
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
    fn strips_nested_tags_and_entities() {
        let mut lines = LineBuffer::load(
            "<SAMI>\n<BODY>\n<SYNC Start=1000><P Class=EN>Hello&nbsp;<b>world</b><br>next\n<SYNC Start=2000><P Class=EN>Bye\n",
        );
        let mut state = fresh_state();
        parse(&mut lines, &mut state);
        let cues = state.cues.finalize();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, -1);
        assert_eq!(cues[0].text, "Hello world\nnext");
        assert_eq!(cues[1].text, "Bye");
    }
}
