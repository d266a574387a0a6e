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

//! In-place edits of a wave file.
//!
//! Each edit issues one seek and one write: the sample rate change rewrites
//! the 44-byte header and nothing else, and the reversal rewrites the sample
//! data at the same offset and length and nothing else. Nothing is done to
//! protect against a crash halfway through a write.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};

use super::config::EditorConfig;
use super::header::{ReadHeaderExt, WaveHeader, WriteHeaderExt, HEADER_SIZE};
use super::info::{summarize, WaveSummary};
use super::samples::{check_whole_frames, frame_width, load_payload, reverse_frames};
use super::validate::{validate, validate_sample_rate};
use super::{EditError, EditResult};

// MARK: Edit functions

/// Relabels the sample rate of a file whose header has already been
/// validated. The byte rate is recomputed to match; the samples are left
/// untouched, so the file plays back faster or slower.
///
/// Returns the header as written.
pub fn rewrite_sample_rate<W>(writer: &mut W, mut header: WaveHeader, new_rate: u32) -> EditResult<WaveHeader>
    where W: Write + Seek
{
    let new_rate = validate_sample_rate(new_rate)?;
    let old_rate = header.sample_rate;

    header.sample_rate = new_rate;
    header.byte_rate = header.derived_byte_rate();
    writer.write_wave_header(&header)?;

    info!("Changed sample rate from {}Hz to {}Hz", old_rate, new_rate);
    Ok(header)
}

/// Reverses the order of the frames in the data chunk of a file whose header
/// has already been validated. Bytes after the data chunk are left alone.
pub fn reverse_payload<T>(file: &mut T, header: &WaveHeader, config: &EditorConfig) -> EditResult<()>
    where T: Read + Write + Seek
{
    let width = frame_width(header)?;
    check_whole_frames(header.data_size as usize, width)?;
    debug!("Reversing with a frame width of {} bytes", width.bytes());

    let payload = load_payload(file, header, config)?;
    let reversed = reverse_frames(&payload, width)?;

    file.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    file.write_all(&reversed)?;
    file.flush()?;

    info!("Reversed {} frames", reversed.len() / width.bytes());
    Ok(())
}

// MARK: Editor

/// Helper struct that takes ownership of an open wave file and its validated
/// header for the duration of one command.
#[derive(Debug)]
pub struct WaveEditor<T>
    where T: Read + Write + Seek
{
    header: WaveHeader,
    config: EditorConfig,

    // The underlying file that we'll read from and write to.
    inner: T,
}

impl WaveEditor<File> {
    /// Opens the file at `path` for reading and writing, and validates its
    /// header. Any failure to open the file, not only a missing one, is
    /// reported as `FileNotFound`.
    pub fn open<P: AsRef<Path>>(path: P, config: EditorConfig) -> EditResult<WaveEditor<File>> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|err| {
                EditError::FileNotFound {
                    path: path.display().to_string(),
                    source: err,
                }
            })?;
        WaveEditor::new(file, config)
    }
}

impl<T> WaveEditor<T>
    where T: Read + Write + Seek
{
    /// Reads and validates the header from the start of `inner`.
    pub fn new(mut inner: T, config: EditorConfig) -> EditResult<WaveEditor<T>> {
        let header = inner.read_wave_header()?;
        validate(&header)?;

        Ok(WaveEditor {
            header: header,
            config: config,
            inner: inner,
        })
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    pub fn summary(&self) -> WaveSummary {
        summarize(&self.header)
    }

    /// Rewrites the declared sample rate. Accepts any integer so that
    /// negative input is reported as an out-of-range rate.
    pub fn set_sample_rate<R: Into<i64>>(&mut self, new_rate: R) -> EditResult<()> {
        let new_rate = validate_sample_rate(new_rate)?;
        self.header = rewrite_sample_rate(&mut self.inner, self.header, new_rate)?;
        Ok(())
    }

    /// Reverses the sample data.
    pub fn reverse(&mut self) -> EditResult<()> {
        reverse_payload(&mut self.inner, &self.header, &self.config)
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

// MARK: Tests
