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

//! The fixed 44-byte canonical wave header.

use std::io::{self, Read, Seek, SeekFrom, Write};

use byteorder::{ByteOrder, NativeEndian};
use log::debug;

use super::endian::{le16, le32};
use super::{EditError, EditResult};

/// The size of the canonical header, and the file offset of the sample data.
pub const HEADER_SIZE: usize = 44;

pub const RIFF_TAG: [u8; 4] = *b"RIFF";
pub const WAVE_TAG: [u8; 4] = *b"WAVE";
pub const FMT_TAG: [u8; 4] = *b"fmt ";
pub const DATA_TAG: [u8; 4] = *b"data";

pub const PCM_FMT_SIZE: u32 = 16;
pub const FORMAT_UNCOMPRESSED_PCM: u16 = 1;

/// The header fields, in file order, with numbers in host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    pub riff_id: [u8; 4],
    pub file_size: u32,
    pub wave_id: [u8; 4],
    pub fmt_id: [u8; 4],
    pub fmt_size: u32,
    pub data_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_id: [u8; 4],
    pub data_size: u32,
}

impl WaveHeader {
    /// Returns a well-formed PCM header for `data_size` bytes of sample data.
    pub fn pcm(num_channels: u16, sample_rate: u32, bits_per_sample: u16, data_size: u32) -> WaveHeader {
        let mut header = WaveHeader {
            riff_id: RIFF_TAG,
            file_size: data_size.wrapping_add(HEADER_SIZE as u32 - 8),
            wave_id: WAVE_TAG,
            fmt_id: FMT_TAG,
            fmt_size: PCM_FMT_SIZE,
            data_format: FORMAT_UNCOMPRESSED_PCM,
            num_channels: num_channels,
            sample_rate: sample_rate,
            byte_rate: 0,
            block_align: 0,
            bits_per_sample: bits_per_sample,
            data_id: DATA_TAG,
            data_size: data_size,
        };
        header.byte_rate = header.derived_byte_rate();
        header.block_align = header.derived_block_align();
        header
    }

    /// The byte rate implied by the sample rate, bit depth, and channel count.
    /// Saturates instead of wrapping for nonsense inputs.
    pub fn derived_byte_rate(&self) -> u32 {
        let rate = self.sample_rate as u64 * (self.bits_per_sample / 8) as u64 * self.num_channels as u64;
        if rate > u32::MAX as u64 { u32::MAX } else { rate as u32 }
    }

    /// The block align implied by the bit depth and channel count.
    pub fn derived_block_align(&self) -> u16 {
        let align = (self.bits_per_sample / 8) as u32 * self.num_channels as u32;
        if align > u16::MAX as u32 { u16::MAX } else { align as u16 }
    }
}

// MARK: Encoding and decoding

/// Parses a header from its on-disk representation.
///
/// Fields are taken from their fixed offsets as they'd lie in memory, then
/// normalized from little-endian if the host is big-endian. Tags are copied
/// as-is.
pub fn decode(bytes: &[u8; HEADER_SIZE]) -> WaveHeader {
    let u16_at = |offset: usize| le16(NativeEndian::read_u16(&bytes[offset..offset + 2]));
    let u32_at = |offset: usize| le32(NativeEndian::read_u32(&bytes[offset..offset + 4]));
    let tag_at = |offset: usize| {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&bytes[offset..offset + 4]);
        tag
    };

    WaveHeader {
        riff_id: tag_at(0),
        file_size: u32_at(4),
        wave_id: tag_at(8),
        fmt_id: tag_at(12),
        fmt_size: u32_at(16),
        data_format: u16_at(20),
        num_channels: u16_at(22),
        sample_rate: u32_at(24),
        byte_rate: u32_at(28),
        block_align: u16_at(32),
        bits_per_sample: u16_at(34),
        data_id: tag_at(36),
        data_size: u32_at(40),
    }
}

/// Produces the on-disk representation of a header. The inverse of `decode`.
pub fn encode(header: &WaveHeader) -> [u8; HEADER_SIZE] {
    let mut bytes = [0u8; HEADER_SIZE];
    {
        let buf = &mut bytes[..];
        buf[0..4].copy_from_slice(&header.riff_id);
        NativeEndian::write_u32(&mut buf[4..8], le32(header.file_size));
        buf[8..12].copy_from_slice(&header.wave_id);
        buf[12..16].copy_from_slice(&header.fmt_id);
        NativeEndian::write_u32(&mut buf[16..20], le32(header.fmt_size));
        NativeEndian::write_u16(&mut buf[20..22], le16(header.data_format));
        NativeEndian::write_u16(&mut buf[22..24], le16(header.num_channels));
        NativeEndian::write_u32(&mut buf[24..28], le32(header.sample_rate));
        NativeEndian::write_u32(&mut buf[28..32], le32(header.byte_rate));
        NativeEndian::write_u16(&mut buf[32..34], le16(header.block_align));
        NativeEndian::write_u16(&mut buf[34..36], le16(header.bits_per_sample));
        buf[36..40].copy_from_slice(&header.data_id);
        NativeEndian::write_u32(&mut buf[40..44], le32(header.data_size));
    }
    bytes
}

// MARK: Reading and writing

pub trait ReadHeaderExt: Read + Seek {
    /// Reads the header from the start of the stream. A stream shorter than
    /// the header is an error, not a partial read.
    fn read_wave_header(&mut self) -> EditResult<WaveHeader> {
        self.seek(SeekFrom::Start(0))?;

        let mut bytes = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match self.read(&mut bytes[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(EditError::Io(err)),
            }
        }

        if filled < HEADER_SIZE {
            return Err(EditError::TruncatedHeader { len: filled });
        }

        let header = decode(&bytes);
        debug!("Decoded wave header: {:?}", header);
        Ok(header)
    }
}

impl<T> ReadHeaderExt for T where T: Read + Seek {}

pub trait WriteHeaderExt: Write + Seek {
    /// Writes the whole header back over the first 44 bytes of the stream.
    fn write_wave_header(&mut self, header: &WaveHeader) -> EditResult<()> {
        self.seek(SeekFrom::Start(0))?;
        self.write_all(&encode(header))?;
        self.flush()?;
        Ok(())
    }
}

impl<T> WriteHeaderExt for T where T: Write + Seek {}

// MARK: Tests
