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

//! Byte order primitives.
//!
//! Wave files are little-endian. The header codec reads fields in the host's
//! native order and uses these helpers to normalize them when the host is
//! big-endian.

use byteorder::{ByteOrder, NativeEndian};

/// Reverses the byte order of a 16-bit value.
pub fn swap16(value: u16) -> u16 {
    (value >> 8) | (value << 8)
}

/// Reverses the byte order of a 32-bit value.
pub fn swap32(value: u32) -> u32 {
    ((value >> 24) & 0x0000_00ff)
        | ((value >> 8) & 0x0000_ff00)
        | ((value << 8) & 0x00ff_0000)
        | ((value << 24) & 0xff00_0000)
}

/// Returns true if the host stores integers most significant byte first.
///
/// Determined by looking at how a known value is laid out in memory.
pub fn host_is_big_endian() -> bool {
    let mut buf = [0u8; 2];
    NativeEndian::write_u16(&mut buf, 1);
    buf[0] != 1
}

/// Converts a 16-bit value between little-endian and host order.
pub fn le16(value: u16) -> u16 {
    if host_is_big_endian() { swap16(value) } else { value }
}

/// Converts a 32-bit value between little-endian and host order.
pub fn le32(value: u32) -> u32 {
    if host_is_big_endian() { swap32(value) } else { value }
}

// MARK: Tests

#[cfg(test)]
mod tests {
    use super::{host_is_big_endian, le16, le32, swap16, swap32};

    #[test]
    fn test_swap16() {
        assert_eq!(0x3412, swap16(0x1234));
        assert_eq!(0x00ff, swap16(0xff00));
        assert_eq!(0, swap16(0));
    }

    #[test]
    fn test_swap32() {
        assert_eq!(0x78563412, swap32(0x12345678));
        assert_eq!(0x0000_00ff, swap32(0xff00_0000));
        assert_eq!(0xffff_ffff, swap32(0xffff_ffff));
    }

    #[test]
    fn test_swaps_are_involutions() {
        for &x in &[0u16, 1, 0x00ff, 0x1234, 0xabcd, u16::MAX] {
            assert_eq!(x, swap16(swap16(x)));
        }
        for &x in &[0u32, 1, 0x0000_ffff, 0x1234_5678, 0xdead_beef, u32::MAX] {
            assert_eq!(x, swap32(swap32(x)));
        }
    }

    #[test]
    fn test_swaps_match_std() {
        assert_eq!(0xbeefu16.swap_bytes(), swap16(0xbeef));
        assert_eq!(0xdead_beefu32.swap_bytes(), swap32(0xdead_beef));
    }

    #[test]
    fn test_host_is_big_endian_matches_target() {
        assert_eq!(cfg!(target_endian = "big"), host_is_big_endian());
    }

    #[test]
    fn test_le_conversions_match_from_le() {
        assert_eq!(u16::from_le(0x1234), le16(0x1234));
        assert_eq!(u32::from_le(0x1234_5678), le32(0x1234_5678));
    }
}
