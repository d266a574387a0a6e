// wavedit -- In-place editing of canonical PCM wave files.
// Copyright (c) 2016 Kevin Brothaler and the riff-wave project authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-place editing of canonical PCM wave files.
//!
//! This library understands exactly one layout: the "canonical" wave PCM
//! file, where a 44-byte header is followed immediately by the sample data.
//! Files with extra chunks between "fmt " and "data", extended format blocks,
//! or compressed data are rejected rather than guessed at.
//!
//! Three things can be done with such a file:
//!
//! * Inspect it: decode and validate the header, then report the bit depth,
//! sample rate, channel layout, and duration.
//! * Relabel the sample rate: rewrite the declared rate (and the byte rate
//! derived from it) without touching the samples. This changes the playback
//! speed and pitch.
//! * Reverse it: rewrite the sample data with the frames in reverse order.
//!
//! Both edits happen in place, with a single write at a fixed offset.
//!
//! # The canonical header
//!
//! All multi-byte fields are little-endian on disk.
//!
//! Offset | Size | Data            | Description
//! -----: | ---: | --------------- | -----------------------------------------
//!      0 |    4 | "RIFF"          | Identifies the main chunk.
//!      4 |    4 | chunk size      | The size of the file minus 8 bytes. Not validated.
//!      8 |    4 | "WAVE"          | Indicates that this is a wave file.
//!     12 |    4 | "fmt "          | Identifies the format subchunk.
//!     16 |    4 | subchunk size   | Must be 16; only the base PCM block is supported.
//!     20 |    2 | format (1)      | 1 for uncompressed PCM.
//!     22 |    2 | num channels    | 1 (mono) or 2 (stereo).
//!     24 |    4 | sample rate     | In the range (0, 192000].
//!     28 |    4 | byte rate       | sample rate * bits per sample / 8 * num channels.
//!     32 |    2 | block align     | bits per sample / 8 * num channels; the size of one frame.
//!     34 |    2 | bits per sample | 8 or 16.
//!     36 |    4 | "data"          | Identifies the data subchunk.
//!     40 |    4 | subchunk size   | The length of the sample data in bytes.
//!     44 |  ... | audio data      | `subchunk size` bytes of interleaved frames.
//!
//! The byte rate and block align are derived values. A file where either one
//! disagrees with the value recomputed from the other fields is rejected.
//!
//! # Example
//!
//! ```no_run
//! use wavedit::{EditorConfig, WaveEditor};
//!
//! # fn main() -> wavedit::EditResult<()> {
//! let mut editor = WaveEditor::open("song.wav", EditorConfig::default())?;
//! println!("{}", editor.summary());
//! editor.set_sample_rate(22050)?;
//! editor.reverse()?;
//! # Ok(())
//! # }
//! ```

use std::io;
use std::result;

use thiserror::Error;

// This is a helper macro that helps us validate results in our tests.
// Thank you bluss and durka42!
#[cfg(test)]
macro_rules! assert_matches {
    ($expected:pat $(if $guard:expr)*, $value:expr) => {
        match $value {
            $expected $(if $guard)* => {},
            ref actual => {
                panic!("assertion failed: `(left matches right)` (left: `{}`, right: `{:?}`",
                    stringify!($expected), actual);
            },
        }
    };
}

pub mod config;
pub mod editor;
pub mod endian;
pub mod header;
pub mod info;
pub mod samples;
pub mod validate;

pub use config::EditorConfig;
pub use editor::{reverse_payload, rewrite_sample_rate, WaveEditor};
pub use header::{WaveHeader, HEADER_SIZE};
pub use info::{summarize, WaveSummary};
pub use samples::{FrameBuffer, FrameWidth};
pub use validate::{validate, validate_sample_rate, MAX_SAMPLE_RATE};

// MARK: Error types

/// Represents an error that occurred while inspecting or editing a wave file.
#[derive(Debug, Error)]
pub enum EditError {
    /// The file could not be opened.
    #[error("File '{path}' could not be opened")]
    FileNotFound {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The file ended before a complete 44-byte header could be read.
    #[error("File is too short to hold a wave header ({len} of 44 bytes)")]
    TruncatedHeader { len: usize },
    /// The file format is incorrect or unsupported.
    #[error("Format error: {0}")]
    Format(FormatErrorKind),
    /// The requested sample rate is outside of (0, 192000].
    #[error("Sample rate {0} is out of range; it must be in (0, 192000]")]
    InvalidRate(i64),
    /// The data chunk doesn't hold a whole number of frames.
    #[error("Data chunk size {data_size} is not a multiple of the {frame_width}-byte frame size")]
    PayloadLengthMismatch { data_size: u32, frame_width: usize },
    /// The data chunk is larger than we're configured to load into memory.
    #[error("Data chunk size {data_size} exceeds the maximum of {max} bytes")]
    PayloadTooLarge { data_size: u32, max: u32 },
    /// The file ends before the end of the data chunk.
    #[error("Data chunk is truncated ({actual} of {expected} bytes present)")]
    TruncatedPayload { expected: u32, actual: usize },
    /// An IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Represents a result when inspecting or editing a wave file.
pub type EditResult<T> = result::Result<T, EditError>;

/// Represents a file format error, when the wave header is incorrect or unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    /// The file does not start with a "RIFF" tag.
    #[error("not a RIFF file")]
    NotARiffFile,
    /// The file doesn't continue with "WAVE" after the RIFF chunk header.
    #[error("not a WAVE file")]
    NotAWaveFile,
    /// The "fmt " subchunk is not where the canonical layout puts it.
    #[error("fmt_ chunk is missing")]
    MissingFmtChunk,
    /// The "data" subchunk is not where the canonical layout puts it.
    #[error("data chunk is missing or not directly after the fmt_ chunk")]
    MissingDataChunk,
    /// Only the 16-byte PCM "fmt " subchunk is supported.
    #[error("Unsupported fmt_ chunk size {0}")]
    UnsupportedFmtSize(u32),
    /// This file is not an uncompressed PCM wave file. Only uncompressed files are supported.
    #[error("Not an uncompressed wave file (format {0})")]
    NotAnUncompressedPcmWaveFile(u16),
    /// Only mono and stereo files are supported.
    #[error("Unsupported number of channels {0}")]
    UnsupportedChannelCount(u16),
    /// The declared sample rate is outside of (0, 192000].
    #[error("Sample rate {0} is out of range")]
    SampleRateOutOfRange(u32),
    /// Only 8-bit and 16-bit PCM files are supported.
    #[error("Unsupported bits per sample {0}")]
    UnsupportedBitsPerSample(u16),
    /// The byte rate disagrees with the sample rate, bit depth, and channel count.
    #[error("Byte rate is {actual}, expected {expected}")]
    ByteRateMismatch { expected: u32, actual: u32 },
    /// The block align disagrees with the bit depth and channel count.
    #[error("Block align is {actual}, expected {expected}")]
    BlockAlignMismatch { expected: u16, actual: u16 },
}

impl From<FormatErrorKind> for EditError {
    fn from(kind: FormatErrorKind) -> EditError {
        EditError::Format(kind)
    }
}
