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

//! Checks a decoded header against the canonical PCM layout.

use log::warn;

use super::header::{WaveHeader, DATA_TAG, FMT_TAG, FORMAT_UNCOMPRESSED_PCM, PCM_FMT_SIZE, RIFF_TAG,
                    WAVE_TAG};
use super::{EditError, EditResult, FormatErrorKind};

/// The highest sample rate we accept, in Hz.
pub const MAX_SAMPLE_RATE: u32 = 192000;

fn validate_tag(tag: &[u8; 4], expected_tag: &[u8; 4], err_kind: FormatErrorKind) -> Result<(), FormatErrorKind> {
    if tag != expected_tag {
        return Err(err_kind);
    }
    Ok(())
}

fn sample_rate_in_range(sample_rate: i64) -> bool {
    sample_rate > 0 && sample_rate <= MAX_SAMPLE_RATE as i64
}

fn check_header(header: &WaveHeader) -> Result<(), FormatErrorKind> {
    validate_tag(&header.riff_id, &RIFF_TAG, FormatErrorKind::NotARiffFile)?;
    validate_tag(&header.wave_id, &WAVE_TAG, FormatErrorKind::NotAWaveFile)?;
    validate_tag(&header.fmt_id, &FMT_TAG, FormatErrorKind::MissingFmtChunk)?;
    validate_tag(&header.data_id, &DATA_TAG, FormatErrorKind::MissingDataChunk)?;

    if header.fmt_size != PCM_FMT_SIZE {
        return Err(FormatErrorKind::UnsupportedFmtSize(header.fmt_size));
    }
    if header.data_format != FORMAT_UNCOMPRESSED_PCM {
        return Err(FormatErrorKind::NotAnUncompressedPcmWaveFile(header.data_format));
    }
    if header.num_channels != 1 && header.num_channels != 2 {
        return Err(FormatErrorKind::UnsupportedChannelCount(header.num_channels));
    }
    if !sample_rate_in_range(header.sample_rate as i64) {
        return Err(FormatErrorKind::SampleRateOutOfRange(header.sample_rate));
    }
    if header.bits_per_sample != 8 && header.bits_per_sample != 16 {
        return Err(FormatErrorKind::UnsupportedBitsPerSample(header.bits_per_sample));
    }

    let expected_byte_rate = header.derived_byte_rate();
    if header.byte_rate != expected_byte_rate {
        return Err(FormatErrorKind::ByteRateMismatch {
            expected: expected_byte_rate,
            actual: header.byte_rate,
        });
    }
    let expected_block_align = header.derived_block_align();
    if header.block_align != expected_block_align {
        return Err(FormatErrorKind::BlockAlignMismatch {
            expected: expected_block_align,
            actual: header.block_align,
        });
    }

    Ok(())
}

/// Validates a header, stopping at the first check that fails.
///
/// Tags are checked first, then the format block, then the derived byte
/// rate and block align.
pub fn validate(header: &WaveHeader) -> Result<(), FormatErrorKind> {
    check_header(header).map_err(|kind| {
        warn!("Rejecting wave header: {}", kind);
        kind
    })
}

impl WaveHeader {
    /// Returns true if this header passes every check in `validate`.
    pub fn is_valid(&self) -> bool {
        check_header(self).is_ok()
    }
}

/// Checks that a requested sample rate lies in (0, 192000].
pub fn validate_sample_rate<R: Into<i64>>(sample_rate: R) -> EditResult<u32> {
    let sample_rate = sample_rate.into();
    if sample_rate_in_range(sample_rate) {
        Ok(sample_rate as u32)
    } else {
        Err(EditError::InvalidRate(sample_rate))
    }
}

// MARK: Tests
