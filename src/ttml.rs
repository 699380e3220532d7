// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! TTML delegation. The teacher crate has no XML-handling precedent of its
//! own (it punts `.idx`/VobSub to an external crate rather than reinvent a
//! binary parser); this follows the same "delegate, don't reinvent" instinct
//! and turns a TTML document into typed structs via `quick_xml::de::from_str`,
//! the same pattern `emarsden-dash-mpd-rs` uses for its own XML manifests.

use serde::Deserialize;

use crate::cue::Cue;

/// TTML-adapter-specific errors, linked into the crate-wide error type.
pub mod errors {
    error_chain! {
        errors {
            /// The document did not parse as well-formed TTML.
            XmlParse(msg: String) {
                description("TTML document could not be parsed")
                display("TTML document could not be parsed: {}", msg)
            }

            /// A `<p>` element had no usable `begin` timestamp.
            MissingBegin {
                description("TTML <p> element has no begin attribute")
            }
        }
    }
}

use self::errors::ErrorKind;
use self::errors::Result;

#[derive(Debug, Deserialize)]
struct Tt {
    body: TtBody,
}

#[derive(Debug, Deserialize, Default)]
struct TtBody {
    #[serde(rename = "div", default)]
    divs: Vec<TtDiv>,
}

#[derive(Debug, Deserialize, Default)]
struct TtDiv {
    #[serde(rename = "p", default)]
    ps: Vec<TtP>,
}

#[derive(Debug, Deserialize, Default)]
struct TtP {
    begin: Option<String>,
    end: Option<String>,
    dur: Option<String>,
    #[serde(rename = "$value", default)]
    content: String,
}

/// Parses TTML's `HH:MM:SS.mmm`, `HH:MM:SS:ff` (frame-count, treated as
/// whole seconds when no framerate context is available), or a bare
/// `SSS.mmms`/`SSSms` offset into microseconds.
fn parse_ttml_time(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Some(digits) = s.strip_suffix("ms") {
        return digits.trim().parse::<f64>().ok().map(|ms| (ms * 1000.0).round() as i64);
    }
    if let Some(digits) = s.strip_suffix('s') {
        return digits.trim().parse::<f64>().ok().map(|secs| (secs * 1_000_000.0).round() as i64);
    }
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let (sec, frac) = match parts[2].find('.') {
        Some(idx) => (&parts[2][..idx], &parts[2][idx + 1..]),
        None => (&parts[2][..], ""),
    };
    let sec: i64 = sec.parse().ok()?;
    let ms: i64 = if frac.is_empty() {
        0
    } else {
        let digits: String = frac.chars().take_while(|c| c.is_ascii_digit()).collect();
        let truncated = if digits.len() >= 3 { &digits[..3] } else { &digits[..] };
        if truncated.is_empty() {
            0
        } else {
            let mut v: i64 = truncated.parse().ok()?;
            for _ in 0..(3 - truncated.len()) {
                v *= 10;
            }
            v
        }
    };
    Some(((h * 3600 + m * 60 + sec) * 1000 + ms) * 1000)
}

fn clean_content(s: &str) -> String {
    s.trim().to_string()
}

/// Parse a TTML document, returning the cues it contains.
pub fn parse(input_text: &str) -> Result<Vec<Cue>> {
    let tt: Tt = quick_xml::de::from_str(input_text).map_err(|e| ErrorKind::XmlParse(e.to_string()))?;

    let mut cues = Vec::new();
    for div in &tt.body.divs {
        for p in &div.ps {
            let begin = match &p.begin {
                Some(b) => b,
                None => continue,
            };
            let start_us = match parse_ttml_time(begin) {
                Some(v) => v,
                None => continue,
            };
            let stop_us = match (&p.end, &p.dur) {
                (Some(end), _) => parse_ttml_time(end).unwrap_or(-1),
                (None, Some(dur)) => parse_ttml_time(dur).map(|d| start_us + d).unwrap_or(-1),
                (None, None) => -1,
            };
            if stop_us >= 0 && start_us > stop_us {
                continue;
            }
            cues.push(Cue::new(start_us, stop_us, clean_content(&p.content)));
        }
    }

    Ok(cues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let xml = r#"<tt xmlns="http://www.w3.org/ns/ttml"><body><div>
            <p begin="00:00:01.000" end="00:00:02.500">Hello world</p>
        </div></body></tt>"#;
        let cues = parse(xml).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 2_500_000);
        assert_eq!(cues[0].text, "Hello world");
    }

    #[test]
    fn derives_stop_from_duration() {
        let xml = r#"<tt><body><div>
            <p begin="00:00:01.000" dur="00:00:00.500">Hi</p>
        </div></body></tt>"#;
        let cues = parse(xml).unwrap();
        assert_eq!(cues[0].start_us, 1_000_000);
        assert_eq!(cues[0].stop_us, 1_500_000);
    }

    #[test]
    fn skips_paragraphs_without_begin() {
        let xml = r#"<tt><body><div>
            <p>no timing</p>
            <p begin="00:00:01.000">Hi</p>
        </div></body></tt>"#;
        let cues = parse(xml).unwrap();
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse("<tt><body>").is_err());
    }
}
