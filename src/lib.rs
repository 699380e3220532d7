// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Probes a subtitle blob against ~20 legacy text formats plus TTML, and
//! demultiplexes it into a single, uniform, time-sorted cue list.
//!
//! This crate is read-only: it never reconstructs or rewrites the original
//! document, only extracts `(start, stop, text)` triples from it.
//!
//! ```
//! let input = "1\n00:00:01,000 --> 00:00:02,500\nHello\n\n";
//! let handle = subdemux::Handle::open(input, 0).unwrap();
//! assert_eq!(handle.format_name(), "SubRIP");
//! assert_eq!(handle.cue_count(), 1);
//! ```

#[macro_use]
extern crate error_chain;
extern crate quick_xml;
extern crate serde;

mod cue;
mod demuxer;
mod formats;
mod line_buffer;
mod prober;
mod ttml;

/// Error-chain generated error types.
pub mod errors;

/// Types that represent a time point, duration and time span.
pub mod timetypes;

pub use crate::cue::Cue;
pub use crate::demuxer::Handle;
pub use crate::formats::FormatTag;
