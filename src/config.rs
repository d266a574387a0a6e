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

use super::{EditError, EditResult};

/// 256 MiB, a bit over 25 minutes of 16-bit stereo at 44.1kHz.
pub const DEFAULT_MAX_PAYLOAD_BYTES: u32 = 256 * 1024 * 1024;

/// Limits applied while editing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// The largest data chunk we'll load into memory, in bytes. The size is
    /// read from the file, so it's checked against this before allocating.
    pub max_payload_bytes: u32,
}

impl Default for EditorConfig {
    fn default() -> EditorConfig {
        EditorConfig { max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES }
    }
}

impl EditorConfig {
    pub fn with_max_payload_bytes(max_payload_bytes: u32) -> EditorConfig {
        EditorConfig { max_payload_bytes: max_payload_bytes }
    }

    pub fn check_payload_size(&self, data_size: u32) -> EditResult<()> {
        if data_size > self.max_payload_bytes {
            return Err(EditError::PayloadTooLarge {
                data_size: data_size,
                max: self.max_payload_bytes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorConfig, DEFAULT_MAX_PAYLOAD_BYTES};
    use crate::EditError;

    #[test]
    fn test_default_limit() {
        assert_eq!(DEFAULT_MAX_PAYLOAD_BYTES, EditorConfig::default().max_payload_bytes);
    }

    #[test]
    fn test_check_payload_size() {
        let config = EditorConfig::with_max_payload_bytes(16);
        assert_matches!(Ok(()), config.check_payload_size(0));
        assert_matches!(Ok(()), config.check_payload_size(16));
        assert_matches!(Err(EditError::PayloadTooLarge { data_size: 17, max: 16 }),
                        config.check_payload_size(17));
    }
}
