// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Returns the string without a leading BOM, and the BOM itself. Unchanged if
/// the string does not start with one.
pub fn split_bom(s: &str) -> (&str, &str) {
    if s.as_bytes().iter().take(3).eq([0xEF, 0xBB, 0xBF].iter()) {
        s.split_at(3)
    } else if s.as_bytes().iter().take(2).eq([0xFE, 0xFF].iter()) {
        s.split_at(2)
    } else {
        ("", s)
    }
}

#[test]
#[allow(unsafe_code)]
fn test_split_bom() {
    let bom1_vec = &[0xEF, 0xBB, 0xBF];
    let bom2_vec = &[0xFE, 0xFF];
    let bom1 = unsafe { ::std::str::from_utf8_unchecked(bom1_vec) };
    let bom2 = unsafe { ::std::str::from_utf8_unchecked(bom2_vec) };

    assert_eq!(
        split_bom(unsafe { ::std::str::from_utf8_unchecked(&[0xEF, 0xBB, 0xBF, b'a', b'b', b'c']) }),
        (bom1, "abc")
    );
    assert_eq!(
        split_bom(unsafe { ::std::str::from_utf8_unchecked(&[0xFE, 0xFF, b'd', b'e', b'g']) }),
        (bom2, "deg")
    );
    assert_eq!(split_bom("bla"), ("", "bla"));
    assert_eq!(split_bom(""), ("", ""));
}

/// Replaces the `|` line-break convention (MicroDVD, VPlayer, MPL2, PJS, PSB)
/// with real newlines.
pub fn replace_pipe_breaks(s: &str) -> String {
    s.replace('|', "\n")
}

/// Replaces the `[br]` line-break convention (SubViewer, DKS) with real newlines.
pub fn replace_bracket_breaks(s: &str) -> String {
    s.replace("[br]", "\n")
}

/// Collapses the handful of SGML/HTML escapes and tags the SAMI and JacoSub
/// parsers need to strip inline, without pulling in a full HTML parser for it.
pub fn replace_nbsp_and_tabs(s: &str) -> String {
    s.replace("&nbsp;", " ").replace('\t', " ")
}

/// The skeleton shared by SubRip and SubViewer (and, with a different timing
/// grammar, several other "timing line, then body until a blank line" formats):
/// skip lines until `parse_timing` recognizes one with `start <= stop`, then
/// accumulate every following line (each `\n`-terminated) until a blank line
/// or end of input, then push the finished cue.
pub fn parse_timed_text_block<F>(
    lines: &mut crate::line_buffer::LineBuffer,
    state: &mut crate::demuxer::DemuxerState,
    mut parse_timing: F,
    postprocess: fn(&str) -> String,
) where
    F: FnMut(&str) -> Option<(i64, i64)>,
{
    loop {
        let line = match lines.next() {
            Some(l) => l,
            None => return,
        };

        let (start_us, stop_us) = match parse_timing(line) {
            Some(t) => t,
            None => continue,
        };
        if stop_us >= 0 && start_us > stop_us {
            continue;
        }

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

        let text = postprocess(&text);
        state.cues.push(crate::cue::Cue::new(start_us, stop_us, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_breaks_become_newlines() {
        assert_eq!(replace_pipe_breaks("a|b|c"), "a\nb\nc");
    }

    #[test]
    fn bracket_breaks_become_newlines() {
        assert_eq!(replace_bracket_breaks("a[br]b"), "a\nb");
    }

    #[test]
    fn nbsp_and_tabs_are_normalized() {
        assert_eq!(replace_nbsp_and_tabs("a&nbsp;b\tc"), "a b c");
    }
}
