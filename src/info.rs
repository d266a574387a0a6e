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

use std::fmt;

use super::header::WaveHeader;

/// A human-readable description of a validated wave file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSummary {
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    pub num_channels: u16,
    /// The number of frames in the data chunk.
    pub sample_count: u32,
    pub duration_seconds: f64,
}

impl WaveSummary {
    pub fn channel_label(&self) -> &'static str {
        if self.num_channels == 1 { "mono" } else { "stereo" }
    }
}

/// Summarizes a header. The header should already have passed validation;
/// a zero block align or sample rate yields zero samples or seconds.
pub fn summarize(header: &WaveHeader) -> WaveSummary {
    let sample_count = header.data_size.checked_div(header.block_align as u32).unwrap_or(0);
    let duration_seconds = if header.sample_rate == 0 {
        0.0
    } else {
        sample_count as f64 / header.sample_rate as f64
    };

    WaveSummary {
        bits_per_sample: header.bits_per_sample,
        sample_rate: header.sample_rate,
        num_channels: header.num_channels,
        sample_count: sample_count,
        duration_seconds: duration_seconds,
    }
}

impl fmt::Display for WaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f,
                 "This is a {}-bit {}Hz {} sound.",
                 self.bits_per_sample,
                 self.sample_rate,
                 self.channel_label())?;
        write!(f,
               "It is {} samples ({:.3} seconds) long.",
               self.sample_count,
               self.duration_seconds)
    }
}
