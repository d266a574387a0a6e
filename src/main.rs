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

//! Command-line front end: `wavedit <FILE> [--rate <RATE> | --reverse]`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::debug;

use wavedit::config::DEFAULT_MAX_PAYLOAD_BYTES;
use wavedit::{EditResult, EditorConfig, WaveEditor};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Inspects and edits canonical PCM wave files in place.
///
/// With only a file, prints the bit depth, sample rate, channel layout, and
/// length of the file.
#[derive(Parser, Debug)]
#[command(name = "wavedit", version, about, long_about)]
struct Cli {
    /// The wave file to inspect or edit
    file: Option<PathBuf>,

    /// Changes the declared sample rate, which makes the file play back
    /// slower or faster. Must be in the range (0, 192000]
    #[arg(long, value_name = "RATE", allow_negative_numbers = true, conflicts_with = "reverse")]
    rate: Option<i64>,

    /// Reverses the file
    #[arg(long)]
    reverse: bool,

    /// The largest data chunk that will be loaded into memory, in bytes
    #[arg(long, value_name = "BYTES", env = "WAVEDIT_MAX_PAYLOAD", default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    max_payload: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn requests_edit(&self) -> bool {
        self.rate.is_some() || self.reverse
    }
}

/// Parses the command line. On failure, returns the exit status after
/// reporting the problem; `--help` and `--version` exit successfully.
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
    where I: IntoIterator<Item = T>,
          T: Into<OsString> + Clone
{
    Cli::try_parse_from(args).map_err(|err| {
        if err.use_stderr() {
            let message = err.to_string();
            eprintln!("ERROR: {}", message.trim_start_matches("error: ").trim_end());
            EXIT_FAILURE
        } else {
            match err.print() {
                Ok(()) => EXIT_SUCCESS,
                Err(_) => EXIT_FAILURE,
            }
        }
    })
}

fn run(file: &Path, cli: &Cli) -> EditResult<()> {
    let config = EditorConfig::with_max_payload_bytes(cli.max_payload);
    let mut editor = WaveEditor::open(file, config)?;
    debug!("Opened {}", file.display());

    if let Some(rate) = cli.rate {
        editor.set_sample_rate(rate)
    } else if cli.reverse {
        editor.reverse()
    } else {
        println!("{}", editor.summary());
        Ok(())
    }
}

/// Carries out a parsed command and returns the exit status.
fn execute(cli: &Cli) -> u8 {
    let file = match cli.file {
        Some(ref file) => file,
        None if cli.requests_edit() => {
            eprintln!("ERROR: No wave file given to edit");
            return EXIT_FAILURE;
        }
        None => {
            // No arguments: show usage.
            return match Cli::command().print_help() {
                Ok(()) => EXIT_SUCCESS,
                Err(_) => EXIT_FAILURE,
            };
        }
    };

    match run(file, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(status) => return ExitCode::from(status),
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    ExitCode::from(execute(&cli))
}

// MARK: Tests
