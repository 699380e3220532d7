// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub use crate::ttml::errors as ttml_errors;

// see https://docs.rs/error-chain/0.8.1/error_chain/
#[cfg_attr(rustfmt, rustfmt_skip)]
error_chain! {
    links {
        TtmlError(ttml_errors::Error, ttml_errors::ErrorKind)
        /// Parsing a TTML document failed.
        ;
    }

    errors {
        /// Probing the input exhausted its line budget without recognizing a format.
        UnknownFormat {
            description("could not recognize the subtitle format")
        }

        /// A format was recognized but produced zero cues.
        EmptyResult {
            description("subtitle format was recognized but no cues could be parsed")
        }

        /// The underlying allocator could not satisfy a request.
        OutOfMemory {
            description("out of memory while parsing subtitles")
        }
    }
}
