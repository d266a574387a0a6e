use std::fs;
use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;

use wavedit::header::encode;
use wavedit::{EditError, EditorConfig, FormatErrorKind, WaveEditor, WaveHeader, HEADER_SIZE};

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

fn write_wave_file(header: &WaveHeader, payload: &[u8]) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(&encode(header)).unwrap();
	file.write_all(payload).unwrap();
	file.flush().unwrap();
	file
}

fn open(path: &Path) -> WaveEditor<fs::File> {
	WaveEditor::open(path, EditorConfig::default()).unwrap()
}

#[test]
fn test_summary_for_16bit_stereo_22050() {
	let file = write_wave_file(&WaveHeader::pcm(2, 22050, 16, 88200), &vec![0u8; 88200]);
	let summary = open(file.path()).summary();
	assert_eq!(16, summary.bits_per_sample);
	assert_eq!(22050, summary.sample_rate);
	assert_eq!("stereo", summary.channel_label());
	assert_eq!(22050, summary.sample_count);
	assert_relative_eq!(1.0, summary.duration_seconds);
}

#[test]
fn test_summary_for_8bit_mono_16000() {
	let file = write_wave_file(&WaveHeader::pcm(1, 16000, 8, 4000), &vec![0x80u8; 4000]);
	let summary = open(file.path()).summary();
	assert_eq!("mono", summary.channel_label());
	assert_eq!(4000, summary.sample_count);
	assert_relative_eq!(0.25, summary.duration_seconds);
	assert_eq!("This is a 8-bit 16000Hz mono sound.\nIt is 4000 samples (0.250 seconds) long.",
	           summary.to_string());
}

#[test]
fn test_set_rate_rewrites_header_only() {
	let payload: Vec<u8> = (0..16).collect();
	let file = write_wave_file(&WaveHeader::pcm(2, 44100, 16, 16), &payload);

	open(file.path()).set_sample_rate(22050).unwrap();

	let header = *open(file.path()).header();
	assert_eq!(22050, header.sample_rate);
	assert_eq!(88200, header.byte_rate);
	assert_eq!(4, header.block_align);

	let bytes = fs::read(file.path()).unwrap();
	assert_eq!(HEADER_SIZE + 16, bytes.len());
	assert_eq!(&payload[..], &bytes[HEADER_SIZE..]);
}

#[test]
fn test_set_rate_boundaries() {
	let file = write_wave_file(&WaveHeader::pcm(1, 44100, 16, 0), b"");
	let mut editor = open(file.path());

	assert_matches!(Ok(()), editor.set_sample_rate(192000));
	assert_matches!(Err(EditError::InvalidRate(192001)), editor.set_sample_rate(192001));
	assert_matches!(Err(EditError::InvalidRate(0)), editor.set_sample_rate(0));

	assert_eq!(192000, open(file.path()).header().sample_rate);
}

#[test]
fn test_reverse_twice_restores_file() {
	let payload: Vec<u8> = (0..=255).collect();
	let file = write_wave_file(&WaveHeader::pcm(2, 44100, 16, 256), &payload);
	let original = fs::read(file.path()).unwrap();

	open(file.path()).reverse().unwrap();
	let reversed = fs::read(file.path()).unwrap();
	assert_eq!(original.len(), reversed.len());
	assert_eq!(&original[..HEADER_SIZE], &reversed[..HEADER_SIZE]);
	assert_eq!(&[252u8, 253, 254, 255], &reversed[HEADER_SIZE..HEADER_SIZE + 4]);

	open(file.path()).reverse().unwrap();
	assert_eq!(original, fs::read(file.path()).unwrap());
}

#[test]
fn test_reverse_8bit_stereo_keeps_pairs() {
	let file = write_wave_file(&WaveHeader::pcm(2, 8000, 8, 6), b"LRlrXY");
	open(file.path()).reverse().unwrap();
	assert_eq!(b"XYlrLR", &fs::read(file.path()).unwrap()[HEADER_SIZE..]);
}

#[test]
fn test_open_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.wav");
	assert_matches!(Err(EditError::FileNotFound { .. }), WaveEditor::open(&path, EditorConfig::default()));
}

#[test]
fn test_open_directory_reports_open_failure() {
	let dir = tempfile::tempdir().unwrap();
	assert_matches!(Err(EditError::FileNotFound { .. }), WaveEditor::open(dir.path(), EditorConfig::default()));
}

#[test]
fn test_open_truncated_file() {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(b"RIFF\x00\x00\x00\x00WAVE").unwrap();
	assert_matches!(Err(EditError::TruncatedHeader { len: 12 }),
	                WaveEditor::open(file.path(), EditorConfig::default()));
}

#[test]
fn test_open_invalid_files() {
	let file = write_wave_file(&WaveHeader::pcm(3, 44100, 16, 0), b"");
	assert_matches!(Err(EditError::Format(FormatErrorKind::UnsupportedChannelCount(3))),
	                WaveEditor::open(file.path(), EditorConfig::default()));

	let file = write_wave_file(&WaveHeader::pcm(1, 44100, 24, 0), b"");
	assert_matches!(Err(EditError::Format(FormatErrorKind::UnsupportedBitsPerSample(24))),
	                WaveEditor::open(file.path(), EditorConfig::default()));

	let header = WaveHeader { byte_rate: 88201, ..WaveHeader::pcm(1, 44100, 16, 0) };
	let file = write_wave_file(&header, b"");
	assert_matches!(Err(EditError::Format(FormatErrorKind::ByteRateMismatch { .. })),
	                WaveEditor::open(file.path(), EditorConfig::default()));
}

#[test]
fn test_reverse_respects_payload_limit() {
	let file = write_wave_file(&WaveHeader::pcm(1, 8000, 8, 64), &[0u8; 64]);
	let mut editor = WaveEditor::open(file.path(), EditorConfig::with_max_payload_bytes(32)).unwrap();
	assert_matches!(Err(EditError::PayloadTooLarge { data_size: 64, max: 32 }), editor.reverse());
}
