// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SSA-1 / SSA-2,3,4 / ASS: a `Format:` header line (inside `[Events]`)
//! locates the `Start`/`End`/`Text` field indices, then every `Dialogue:`
//! line is split on that layout.
//!
//! Grounded on the teacher's `SsaFieldsInfo::new_from_fields_info_line` (field
//! index discovery) and `parse_timepoint` (centisecond timestamp grammar);
//! generalized across all three script-type variants instead of one fixed
//! field layout, and with the non-destructive `SsaFilePart`/`to_data`
//! reconstruction machinery dropped since this demuxer never writes a file
//! back out.

use crate::cue::Cue;
use crate::demuxer::DemuxerState;
use crate::formats::FormatTag;
use crate::line_buffer::LineBuffer;

struct FieldsInfo {
    start_idx: usize,
    end_idx: usize,
    num_fields: usize,
}

fn parse_format_line(line: &str) -> Option<FieldsInfo> {
    let rest = line["Format:".len()..].trim_start();
    let fields: Vec<&str> = rest.split(',').map(|f| f.trim()).collect();
    let mut start_idx = None;
    let mut end_idx = None;
    let mut text_idx = None;
    for (i, f) in fields.iter().enumerate() {
        match *f {
            "Start" => start_idx = Some(i),
            "End" => end_idx = Some(i),
            "Text" => text_idx = Some(i),
            _ => {}
        }
    }
    // Text must be present and last, matching the teacher's own validation.
    if text_idx != Some(fields.len() - 1) {
        return None;
    }
    Some(FieldsInfo {
        start_idx: start_idx?,
        end_idx: end_idx?,
        num_fields: fields.len(),
    })
}

/// Parses `H:MM:SS.cs` (centiseconds), accepting either `.` or `:` before the
/// last field, as the original grammar does.
fn parse_timepoint(s: &str) -> Option<i64> {
    let parts: Vec<&str> = s.trim().split(|c| c == ':' || c == '.').collect();
    if parts.len() != 4 {
        return None;
    }
    let h: i64 = parts[0].parse().ok()?;
    let m: i64 = parts[1].parse().ok()?;
    let sec: i64 = parts[2].parse().ok()?;
    let cs: i64 = parts[3].parse().ok()?;
    Some(((h * 3600 + m * 60 + sec) * 100 + cs) * 10_000)
}

fn split_dialogue_fields(rest: &str, num_fields: usize) -> Option<Vec<&str>> {
    let mut parts = Vec::with_capacity(num_fields);
    let mut remaining = rest.trim_start();
    for _ in 0..num_fields - 1 {
        let idx = remaining.find(',')?;
        parts.push(remaining[..idx].trim());
        remaining = &remaining[idx + 1..];
    }
    parts.push(remaining);
    Some(parts)
}

fn parse_dialogue_line(line: &str, fi: &FieldsInfo, tag: FormatTag, cue_index: i64) -> Option<(i64, i64, String)> {
    let rest = &line["Dialogue:".len()..];
    let parts = split_dialogue_fields(rest, fi.num_fields)?;
    if parts.len() != fi.num_fields {
        return None;
    }

    let start_us = parse_timepoint(parts[fi.start_idx])?;
    let stop_us = parse_timepoint(parts[fi.end_idx])?;

    let layer_str = match tag {
        FormatTag::Ssa1 => String::new(),
        FormatTag::Ass => parts
            .first()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .to_string(),
        _ => "0".to_string(),
    };

    let rest_fields: Vec<&str> = parts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != fi.start_idx && *i != fi.end_idx)
        .map(|(_, f)| *f)
        .collect();

    let text = format!("{},{},{}", cue_index, layer_str, rest_fields.join(","));
    Some((start_us, stop_us, text))
}

/// Parse an SSA-1, SSA-2/3/4, or ASS document, pushing every cue it contains
/// into `state`. Non-`Dialogue:` lines (including the `Format:` line itself)
/// are accumulated into `state.header`.
pub fn parse(lines: &mut LineBuffer, state: &mut DemuxerState, tag: FormatTag) {
    let mut fields_info: Option<FieldsInfo> = None;
    let mut in_events = false;
    let mut cue_index: i64 = 0;

    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_events = trimmed.eq_ignore_ascii_case("[Events]");
            if !state.header.is_empty() {
                state.header.push('\n');
            }
            state.header.push_str(line);
            continue;
        }

        if in_events && trimmed.starts_with("Format:") {
            fields_info = parse_format_line(trimmed);
            continue;
        }

        if in_events && trimmed.starts_with("Dialogue:") {
            if let Some(fi) = &fields_info {
                if let Some((start_us, stop_us, text)) = parse_dialogue_line(trimmed, fi, tag, cue_index) {
                    if start_us <= stop_us {
                        state.cues.push(Cue::new(start_us, stop_us, text));
                        cue_index += 1;
                    }
                }
            }
            continue;
        }

        if !state.header.is_empty() {
            state.header.push('\n');
        }
        state.header.push_str(line);
    }
}
