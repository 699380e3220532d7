// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits an input blob into a random-access, rewindable line sequence.
//!
//! Grounded on the line-splitting half of `formats::common::get_lines_non_destructive`
//! (which this crate no longer needs in its non-destructive form, since nothing is
//! written back out), generalized with a `putback` cursor operation the way the
//! original C demuxer's `TextPreviousLine` lets a parser un-consume a line it peeked.

/// Splits `s` on any of `\r\n`, `\r`, `\n`, keeping line content only (terminators
/// are consumed, never kept in the returned line).
fn split_lines(s: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut cur));
            }
            '\n' => {
                lines.push(std::mem::take(&mut cur));
            }
            _ => cur.push(c),
        }
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// A rewindable cursor over the lines of an input blob.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    pos: usize,
}

impl LineBuffer {
    /// Split `blob` into lines and position the cursor at the start.
    pub fn load(blob: &str) -> LineBuffer {
        LineBuffer {
            lines: split_lines(blob),
            pos: 0,
        }
    }

    /// Return the next line and advance the cursor, or `None` at end of input.
    pub fn next(&mut self) -> Option<&str> {
        if self.pos < self.lines.len() {
            let line = &self.lines[self.pos];
            self.pos += 1;
            Some(line)
        } else {
            None
        }
    }

    /// Un-consume the last line returned by `next`, so the next call to `next`
    /// returns it again. Saturates at zero; calling it with no prior `next` is
    /// a no-op rather than an error, matching how the parsers that use it only
    /// ever call it once right after a successful `next`.
    pub fn putback(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Whether the cursor has reached the end of the input.
    pub fn eof(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Current cursor position (0-based index of the next line `next` would return).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total number of lines in the buffer.
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mixed_line_endings() {
        let buf = LineBuffer::load("a\r\nb\rc\nd");
        assert_eq!(buf.lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn next_and_eof() {
        let mut buf = LineBuffer::load("a\nb\n");
        assert_eq!(buf.next(), Some("a"));
        assert_eq!(buf.next(), Some("b"));
        assert!(!buf.eof());
        assert_eq!(buf.next(), None);
        assert!(buf.eof());
    }

    #[test]
    fn putback_replays_last_line() {
        let mut buf = LineBuffer::load("a\nb\n");
        assert_eq!(buf.next(), Some("a"));
        buf.putback();
        assert_eq!(buf.next(), Some("a"));
        assert_eq!(buf.next(), Some("b"));
    }

    #[test]
    fn preserves_empty_lines() {
        let buf = LineBuffer::load("a\n\nb\n");
        assert_eq!(buf.lines, vec!["a", "", "b"]);
    }
}
