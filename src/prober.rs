// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Classifies an input blob into one of the known format tags by scanning its
//! first lines for a priority-ordered list of signatures.
//!
//! Grounded directly on `SubProbeType()` in the original VLC subtitle demuxer:
//! the same fixed line budget, the same "first signature to match a line
//! wins" evaluation order, and the same per-format textual tells.

use crate::formats::FormatTag;

/// Number of leading lines the prober is willing to inspect before giving up.
const PROBE_LINE_BUDGET: usize = 256;

/// Classify `text` into a format tag, or `FormatTag::Unknown` if nothing in
/// the first [`PROBE_LINE_BUDGET`] lines matches a known signature.
pub fn probe(text: &str) -> FormatTag {
    for line in text.lines().take(PROBE_LINE_BUDGET) {
        if let Some(tag) = classify_line(line) {
            return tag;
        }
    }
    FormatTag::Unknown
}

fn classify_line(line: &str) -> Option<FormatTag> {
    let upper = line.to_ascii_uppercase();

    if upper.contains("<SAMI>") {
        return Some(FormatTag::Sami);
    }
    if is_microdvd_line(line) {
        return Some(FormatTag::MicroDvd);
    }
    if is_subrip_timing_line(line) {
        return Some(FormatTag::SubRip);
    }
    if upper.contains("THIS IS A SUB STATION ALPHA V1") {
        return Some(FormatTag::Ssa1);
    }
    if line.trim() == "ScriptType: v4.00+" {
        return Some(FormatTag::Ass);
    }
    if line.trim() == "ScriptType: v4.00" {
        return Some(FormatTag::Ssa24);
    }
    if line.starts_with("Dialogue: Marked") {
        return Some(FormatTag::Ssa24);
    }
    if line.starts_with("Dialogue:") {
        return Some(FormatTag::Ass);
    }
    if upper.contains("[INFORMATION]") {
        return Some(FormatTag::SubViewer);
    }
    if is_jacosub_line(line) {
        return Some(FormatTag::JacoSub);
    }
    if is_sbv_line(line) {
        return Some(FormatTag::Sbv);
    }
    if is_vplayer_line(line) {
        return Some(FormatTag::VPlayer);
    }
    if is_dvdsubtitle_line(line) {
        return Some(FormatTag::DvdSubtitle);
    }
    if is_dks_line(line) {
        return Some(FormatTag::Dks);
    }
    if upper.contains("*** START SCRIPT") {
        return Some(FormatTag::SubView1);
    }
    if is_mpl2_line(line) {
        return Some(FormatTag::Mpl2);
    }
    if line.starts_with("FORMAT=") {
        return Some(FormatTag::MpSub);
    }
    if line.contains("-->> ") {
        return Some(FormatTag::Aqt);
    }
    if is_pjs_line(line) {
        return Some(FormatTag::Pjs);
    }
    if is_psb_line(line) {
        return Some(FormatTag::Psb);
    }
    if upper.contains("<TIME") {
        return Some(FormatTag::RealText);
    }
    if line.starts_with("WEBVTT") {
        return Some(FormatTag::Vtt);
    }
    if upper.contains("/TTML") || upper.contains("/TTAF") || upper.contains("<TT ") || upper.contains("<TT>") {
        return Some(FormatTag::Ttml);
    }

    None
}

/// `{123}{456}` or `{123}{}`.
fn is_microdvd_line(line: &str) -> bool {
    let l = line.trim_start();
    if !l.starts_with('{') {
        return false;
    }
    let rest = &l[1..];
    let (num1, rest) = match split_digits(rest) {
        Some(v) => v,
        None => return false,
    };
    let rest = match rest.strip_prefix('}') {
        Some(r) => r,
        None => return false,
    };
    if !rest.starts_with('{') {
        return false;
    }
    let rest = &rest[1..];
    let (_num2, rest) = split_digits(rest).unwrap_or(("", rest));
    let _ = num1;
    rest.starts_with('}')
}

fn split_digits(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        None
    } else {
        Some((&s[..end], &s[end..]))
    }
}

/// `H:MM:SS[,.]mmm --> H:MM:SS[,.]mmm`, with milliseconds optional.
fn is_subrip_timing_line(line: &str) -> bool {
    match line.find("-->") {
        Some(idx) => {
            let (before, after) = (&line[..idx], &line[idx + 3..]);
            looks_like_hms_timestamp(before.trim()) && looks_like_hms_timestamp(after.trim())
        }
        None => false,
    }
}

fn looks_like_hms_timestamp(s: &str) -> bool {
    let s = s.trim_end_matches(|c: char| c.is_whitespace());
    let fields: Vec<&str> = s.split(|c| c == ':' || c == ',' || c == '.').collect();
    fields.len() >= 3 && fields.iter().all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

/// SBV: `H:M:S.mmm,H:M:S.mmm` (comma joins the two timestamps directly, no arrow).
fn is_sbv_line(line: &str) -> bool {
    let parts: Vec<&str> = line.splitn(2, ',').collect();
    if parts.len() != 2 {
        return false;
    }
    looks_like_hms_timestamp(parts[0].trim()) && looks_like_hms_timestamp(parts[1].trim())
}

/// JacoSub: `H:M:S.f H:M:S.f ...` or `@123 @456 ...`.
fn is_jacosub_line(line: &str) -> bool {
    if line.starts_with('@') {
        let mut it = line.split_whitespace();
        if let (Some(a), Some(b)) = (it.next(), it.next()) {
            return a.starts_with('@')
                && a[1..].chars().all(|c| c.is_ascii_digit())
                && !a[1..].is_empty()
                && b.starts_with('@')
                && b[1..].chars().all(|c| c.is_ascii_digit())
                && !b[1..].is_empty();
        }
        return false;
    }
    let mut it = line.split_whitespace();
    match (it.next(), it.next()) {
        (Some(a), Some(b)) => looks_like_hms_timestamp(a) && looks_like_hms_timestamp(b),
        _ => false,
    }
}

/// VPlayer: `H:M:S<sep>text` where sep is a single non-digit character (not
/// necessarily `:` — VLC's own probe accepts any delimiter there).
fn is_vplayer_line(line: &str) -> bool {
    let mut parts = line.splitn(3, ':');
    let is_digits = |f: &str| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit());
    if !parts.next().map(is_digits).unwrap_or(false) {
        return false;
    }
    if !parts.next().map(is_digits).unwrap_or(false) {
        return false;
    }
    let rest = match parts.next() {
        Some(r) => r,
        None => return false,
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    end > 0 && end < rest.len()
}

/// DVDSubtitle: `{T H:M:S:cs`.
fn is_dvdsubtitle_line(line: &str) -> bool {
    let l = line.trim_start();
    if !l.starts_with("{T ") {
        return false;
    }
    let rest = &l[3..];
    let fields: Vec<&str> = rest.splitn(4, ':').collect();
    fields.len() >= 4 && fields[0..3].iter().all(|f| f.chars().all(|c| c.is_ascii_digit()) && !f.is_empty())
}

/// DKS: `[H:M:S]` followed by more content on the same line.
fn is_dks_line(line: &str) -> bool {
    if !line.starts_with('[') {
        return false;
    }
    match line.find(']') {
        Some(idx) => {
            let inner = &line[1..idx];
            let fields: Vec<&str> = inner.split(':').collect();
            fields.len() == 3
                && fields.iter().all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
                && idx + 1 < line.len()
        }
        None => false,
    }
}

/// MPL2: `[123][456]` or `[123][]`.
fn is_mpl2_line(line: &str) -> bool {
    let l = line.trim_start();
    if !l.starts_with('[') {
        return false;
    }
    let rest = &l[1..];
    let (_n1, rest) = match split_digits(rest) {
        Some(v) => v,
        None => return false,
    };
    let rest = match rest.strip_prefix(']') {
        Some(r) => r,
        None => return false,
    };
    if !rest.starts_with('[') {
        return false;
    }
    let rest = &rest[1..];
    let (_n2, rest) = split_digits(rest).unwrap_or(("", rest));
    rest.starts_with(']')
}

/// PJS: `123,456,"text`.
fn is_pjs_line(line: &str) -> bool {
    let parts: Vec<&str> = line.splitn(3, ',').collect();
    parts.len() == 3
        && !parts[0].is_empty()
        && parts[0].chars().all(|c| c.is_ascii_digit())
        && !parts[1].is_empty()
        && parts[1].chars().all(|c| c.is_ascii_digit())
}

/// PSB: `{H:M:S}` opening a cue line.
fn is_psb_line(line: &str) -> bool {
    let l = line.trim_start();
    if !l.starts_with('{') {
        return false;
    }
    match l.find('}') {
        Some(idx) => {
            let inner = &l[1..idx];
            let fields: Vec<&str> = inner.split(':').collect();
            fields.len() == 3 && fields.iter().all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_subrip() {
        assert_eq!(probe("1\n00:00:01,000 --> 00:00:02,000\nHi\n"), FormatTag::SubRip);
    }

    #[test]
    fn detects_microdvd() {
        assert_eq!(probe("{1}{1}25\n{25}{50}Hi\n"), FormatTag::MicroDvd);
    }

    #[test]
    fn detects_webvtt() {
        assert_eq!(probe("WEBVTT\n\n00:01.000 --> 00:00:02.000\nHi\n"), FormatTag::Vtt);
    }

    #[test]
    fn detects_mpl2() {
        assert_eq!(probe("[10][25]Line A|Line B\n"), FormatTag::Mpl2);
    }

    #[test]
    fn detects_sami() {
        assert_eq!(probe("<SAMI>\n<BODY>\n"), FormatTag::Sami);
    }

    #[test]
    fn detects_vplayer_with_space_separator() {
        assert_eq!(probe("0:0:1 Hello world\n"), FormatTag::VPlayer);
    }

    #[test]
    fn unknown_on_garbage() {
        assert_eq!(probe("random text\nno timings here\n"), FormatTag::Unknown);
    }

    #[test]
    fn empty_input_is_unknown() {
        assert_eq!(probe(""), FormatTag::Unknown);
    }

    #[test]
    fn subrip_outranks_sbv_when_arrow_present() {
        assert_eq!(probe("00:00:01.000 --> 00:00:02.000\nHi\n"), FormatTag::SubRip);
    }
}
