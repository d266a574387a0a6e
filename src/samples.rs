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

//! Views the sample data as a sequence of whole frames.
//!
//! A frame is one sample for each channel. Reversing a file means reversing
//! the order of frames while leaving the bytes inside each frame alone, so a
//! stereo pair is never split and neither are the two bytes of a 16-bit
//! sample. The frame is 1, 2, or 4 bytes wide for the supported formats, so
//! the data can be treated as an array of `u8`, `u16`, or `u32` elements and
//! reversed element by element.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, NativeEndian};
use log::debug;

use super::config::EditorConfig;
use super::header::{WaveHeader, HEADER_SIZE};
use super::{EditError, EditResult, FormatErrorKind};

/// The size of one frame in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameWidth {
    /// 8-bit mono.
    One = 1,
    /// 8-bit stereo, or 16-bit mono.
    Two = 2,
    /// 16-bit stereo.
    Four = 4,
}

impl FrameWidth {
    pub fn for_format(bits_per_sample: u16, num_channels: u16) -> Result<FrameWidth, FormatErrorKind> {
        match (bits_per_sample, num_channels) {
            (8, 1) => Ok(FrameWidth::One),
            (8, 2) | (16, 1) => Ok(FrameWidth::Two),
            (16, 2) => Ok(FrameWidth::Four),
            (8, _) | (16, _) => Err(FormatErrorKind::UnsupportedChannelCount(num_channels)),
            _ => Err(FormatErrorKind::UnsupportedBitsPerSample(bits_per_sample)),
        }
    }

    pub fn bytes(self) -> usize {
        self as usize
    }
}

/// Returns the frame width declared by a header.
pub fn frame_width(header: &WaveHeader) -> EditResult<FrameWidth> {
    Ok(FrameWidth::for_format(header.bits_per_sample, header.num_channels)?)
}

/// Fails unless `len` bytes hold a whole number of frames.
pub(crate) fn check_whole_frames(len: usize, width: FrameWidth) -> EditResult<()> {
    if len % width.bytes() != 0 {
        return Err(EditError::PayloadLengthMismatch {
            data_size: len as u32,
            frame_width: width.bytes(),
        });
    }
    Ok(())
}

/// Sample data reinterpreted as an array of frame-sized elements.
///
/// Elements are read and written in native byte order, so converting from
/// bytes and back reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBuffer {
    Frames8(Vec<u8>),
    Frames16(Vec<u16>),
    Frames32(Vec<u32>),
}

impl FrameBuffer {
    pub fn from_bytes(bytes: &[u8], width: FrameWidth) -> EditResult<FrameBuffer> {
        check_whole_frames(bytes.len(), width)?;

        let frames = bytes.len() / width.bytes();
        Ok(match width {
            FrameWidth::One => FrameBuffer::Frames8(bytes.to_vec()),
            FrameWidth::Two => {
                let mut buf = vec![0u16; frames];
                NativeEndian::read_u16_into(bytes, &mut buf);
                FrameBuffer::Frames16(buf)
            }
            FrameWidth::Four => {
                let mut buf = vec![0u32; frames];
                NativeEndian::read_u32_into(bytes, &mut buf);
                FrameBuffer::Frames32(buf)
            }
        })
    }

    pub fn width(&self) -> FrameWidth {
        match *self {
            FrameBuffer::Frames8(_) => FrameWidth::One,
            FrameBuffer::Frames16(_) => FrameWidth::Two,
            FrameBuffer::Frames32(_) => FrameWidth::Four,
        }
    }

    /// The number of frames.
    pub fn len(&self) -> usize {
        match *self {
            FrameBuffer::Frames8(ref buf) => buf.len(),
            FrameBuffer::Frames16(ref buf) => buf.len(),
            FrameBuffer::Frames32(ref buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reverses the order of the frames. With an odd number of frames, the
    /// middle one stays put.
    pub fn reverse(&mut self) {
        match *self {
            FrameBuffer::Frames8(ref mut buf) => reverse_in_place(buf),
            FrameBuffer::Frames16(ref mut buf) => reverse_in_place(buf),
            FrameBuffer::Frames32(ref mut buf) => reverse_in_place(buf),
        }
    }

    /// Copies the frames back out as bytes, unchanged.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.len() * self.width().bytes()];
        match *self {
            FrameBuffer::Frames8(ref buf) => bytes.copy_from_slice(buf),
            FrameBuffer::Frames16(ref buf) => NativeEndian::write_u16_into(buf, &mut bytes),
            FrameBuffer::Frames32(ref buf) => NativeEndian::write_u32_into(buf, &mut bytes),
        }
        bytes
    }
}

fn reverse_in_place<S>(arr: &mut [S]) {
    let size = arr.len();
    for i in 0..size / 2 {
        arr.swap(i, size - 1 - i);
    }
}

/// Reverses the order of `width`-sized frames in `bytes`.
pub fn reverse_frames(bytes: &[u8], width: FrameWidth) -> EditResult<Vec<u8>> {
    let mut frames = FrameBuffer::from_bytes(bytes, width)?;
    frames.reverse();
    Ok(frames.to_bytes())
}

/// Reads the `data_size` bytes that follow the header.
pub fn load_payload<R>(reader: &mut R, header: &WaveHeader, config: &EditorConfig) -> EditResult<Vec<u8>>
    where R: Read + Seek
{
    config.check_payload_size(header.data_size)?;

    reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    let mut payload = Vec::with_capacity(header.data_size as usize);
    reader.take(header.data_size as u64).read_to_end(&mut payload)?;

    if payload.len() != header.data_size as usize {
        return Err(EditError::TruncatedPayload {
            expected: header.data_size,
            actual: payload.len(),
        });
    }

    debug!("Loaded {} bytes of sample data", payload.len());
    Ok(payload)
}

// MARK: Tests
