// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Format tags, the parser registry, and the per-format parser modules.

pub mod common;
pub mod microdvd;
pub mod srt;
pub mod subviewer;
pub mod subviewer1;
pub mod ssa;
pub mod vplayer;
pub mod sami;
pub mod dvdsubtitle;
pub mod mpl2;
pub mod aqt;
pub mod pjs;
pub mod mpsub;
pub mod jacosub;
pub mod psb;
pub mod realtext;
pub mod dks;
pub mod vtt;

use crate::demuxer::DemuxerState;
use crate::line_buffer::LineBuffer;

/// Every subtitle format this crate can recognize and parse, plus `Unknown`
/// for anything the prober could not classify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// `{start}{end}text`, frame-indexed.
    MicroDvd,
    /// `HH:MM:SS,mmm --> HH:MM:SS,mmm`.
    SubRip,
    /// `[INFORMATION]` header, `HH:MM:SS.cc,HH:MM:SS.cc` pairs.
    SubViewer,
    /// `!: This is a Sub Station Alpha v1` header.
    Ssa1,
    /// `ScriptType: v4.00` header, `Dialogue: Marked=...`.
    Ssa24,
    /// `ScriptType: v4.00+` header, `Dialogue: <layer>,...`.
    Ass,
    /// `H:M:S<sep>text`.
    VPlayer,
    /// `<SAMI>` document.
    Sami,
    /// `{T H:M:S:cs ... }`.
    DvdSubtitle,
    /// `[start][end]text`, tenths of a second.
    Mpl2,
    /// `-->> <n>` markers.
    Aqt,
    /// `n1,n2,"text`.
    Pjs,
    /// `FORMAT=...` header, cumulative float offsets.
    MpSub,
    /// `H:M:S.f H:M:S.f text` or `@f1 @f2 text`.
    JacoSub,
    /// `{H:M:S}{H:M:S}text`.
    Psb,
    /// `<time begin="..." end="...">text`.
    RealText,
    /// `[H:M:S]text`.
    Dks,
    /// `*** START SCRIPT` header, `[H:M:S]` on its own line.
    SubView1,
    /// `WEBVTT` header.
    Vtt,
    /// `H:M:S.mmm,H:M:S.mmm`.
    Sbv,
    /// XML document, delegated to the TTML adapter.
    Ttml,
    /// Probing exhausted its line budget without a match.
    Unknown,
}

impl FormatTag {
    /// The stable, user-visible display name for this format.
    pub fn display_name(self) -> &'static str {
        match self {
            FormatTag::MicroDvd => "MicroDVD",
            FormatTag::SubRip => "SubRIP",
            FormatTag::SubViewer => "SubViewer",
            FormatTag::Ssa1 => "SSA-1",
            FormatTag::Ssa24 => "SSA-2/3/4",
            FormatTag::Ass => "SSA/ASS",
            FormatTag::VPlayer => "VPlayer",
            FormatTag::Sami => "SAMI",
            FormatTag::DvdSubtitle => "DVDSubtitle",
            FormatTag::Mpl2 => "MPL2",
            FormatTag::Aqt => "AQTitle",
            FormatTag::Pjs => "PhoenixSub",
            FormatTag::MpSub => "MPSub",
            FormatTag::JacoSub => "JacoSub",
            FormatTag::Psb => "PowerDivx",
            FormatTag::RealText => "RealText",
            FormatTag::Dks => "DKS",
            FormatTag::SubView1 => "Subviewer 1",
            FormatTag::Vtt => "WebVTT",
            FormatTag::Sbv => "SBV",
            FormatTag::Ttml => "TTML",
            FormatTag::Unknown => "Unknown",
        }
    }
}

/// Drive the format-specific parser named by `tag` over `lines`, pushing every
/// cue it finds into `state`. `Ttml` and `Unknown` are not dispatched here;
/// the demuxer handles those two before reaching this table.
pub fn parse_into(tag: FormatTag, lines: &mut LineBuffer, state: &mut DemuxerState) {
    match tag {
        FormatTag::MicroDvd => microdvd::parse(lines, state),
        FormatTag::SubRip => srt::parse(lines, state),
        FormatTag::SubViewer => subviewer::parse(lines, state),
        FormatTag::Ssa1 | FormatTag::Ssa24 | FormatTag::Ass => ssa::parse(lines, state, tag),
        FormatTag::VPlayer => vplayer::parse(lines, state),
        FormatTag::Sami => sami::parse(lines, state),
        FormatTag::DvdSubtitle => dvdsubtitle::parse(lines, state),
        FormatTag::Mpl2 => mpl2::parse(lines, state),
        FormatTag::Aqt => aqt::parse(lines, state),
        FormatTag::Pjs => pjs::parse(lines, state),
        FormatTag::MpSub => mpsub::parse(lines, state),
        FormatTag::JacoSub => jacosub::parse(lines, state),
        FormatTag::Psb => psb::parse(lines, state),
        FormatTag::RealText => realtext::parse(lines, state),
        FormatTag::Dks => dks::parse(lines, state),
        FormatTag::SubView1 => subviewer1::parse(lines, state),
        FormatTag::Vtt => vtt::parse_vtt(lines, state),
        FormatTag::Sbv => vtt::parse_sbv(lines, state),
        FormatTag::Ttml | FormatTag::Unknown => {
            // Handled upstream in Demuxer::open.
        }
    }
}
