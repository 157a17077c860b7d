//! Command-line interface for framed DES file encryption.

#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use des_core::{expand_key, DesKey};
use des_frame::{FrameError, Mode};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// IV baked into the tool for CBC mode. There is no surface to override it.
const DEFAULT_IV: u64 = 0xFB3C_7189_2460_5AED;

/// DES file encryption (ECB/CBC) with a length-preserving frame.
#[derive(Parser)]
#[command(
    name = "des",
    version,
    about = "DES file encryption (ECB/CBC) with a length-preserving frame"
)]
struct Cli {
    /// -e to encrypt, -d to decrypt (case-insensitive).
    #[arg(allow_hyphen_values = true)]
    action: String,
    /// 16 hex digits or exactly 8 characters. Surround non-hex keys with
    /// single quotes; add double quotes if the key contains spaces.
    #[arg(allow_hyphen_values = true)]
    key: String,
    /// ecb or cbc (case-insensitive).
    mode: String,
    /// Path to the input file.
    input: PathBuf,
    /// Path to the output file (overwritten).
    output: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unknown action: {0} (expected -e or -d)")]
    UnknownAction(String),
    #[error("malformed key: expected 16 hex digits or 8 characters")]
    MalformedKey,
    #[error("unrecognized mode: {0}")]
    UnknownMode(String),
    #[error("unable to open file for read: {path}: {source}")]
    Input { path: PathBuf, source: io::Error },
    #[error("unable to open file for write: {path}: {source}")]
    Output { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Frame(#[from] FrameError),
}

// Exit codes are part of the tool's contract: scripts distinguish failure
// cases by code, stderr carries one diagnostic line.
const EXIT_SYNTAX: u8 = 1;
const EXIT_ACTION: u8 = 2;
const EXIT_BAD_INPUT: u8 = 3;
const EXIT_BAD_OUTPUT: u8 = 4;
const EXIT_TOO_BIG: u8 = 5;
const EXIT_MISALIGNED: u8 = 6;

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::MalformedKey | CliError::UnknownMode(_) => EXIT_SYNTAX,
            CliError::UnknownAction(_) => EXIT_ACTION,
            CliError::Input { .. } => EXIT_BAD_INPUT,
            CliError::Output { .. } => EXIT_BAD_OUTPUT,
            CliError::Frame(FrameError::TooLarge(_)) => EXIT_TOO_BIG,
            CliError::Frame(_) => EXIT_MISALIGNED,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(EXIT_SYNTAX);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let action = parse_action(&cli.action)?;
    let key = parse_key(&cli.key)?;
    let mode = parse_mode(&cli.mode)?;
    let round_keys = expand_key(&key);

    let data = fs::read(&cli.input).map_err(|source| CliError::Input {
        path: cli.input.clone(),
        source,
    })?;

    // Frame checks run before the output file is created, so an oversized or
    // misaligned input never leaves a partial file behind.
    let transformed = match action {
        Action::Encrypt => {
            let mut rng = process_rng();
            des_frame::encrypt(&data, &round_keys, mode, &mut rng)?
        }
        Action::Decrypt => des_frame::decrypt(&data, &round_keys, mode)?,
    };

    fs::write(&cli.output, transformed).map_err(|source| CliError::Output {
        path: cli.output.clone(),
        source,
    })?;
    Ok(())
}

fn parse_action(raw: &str) -> Result<Action, CliError> {
    if raw.eq_ignore_ascii_case("-e") {
        Ok(Action::Encrypt)
    } else if raw.eq_ignore_ascii_case("-d") {
        Ok(Action::Decrypt)
    } else {
        Err(CliError::UnknownAction(raw.to_string()))
    }
}

fn parse_key(raw: &str) -> Result<DesKey, CliError> {
    match raw.len() {
        16 => {
            let bytes = hex::decode(raw).map_err(|_| CliError::MalformedKey)?;
            let packed: [u8; 8] = bytes
                .try_into()
                .expect("sixteen hex digits decode to eight bytes");
            Ok(DesKey::from(packed))
        }
        8 => Ok(DesKey::from(pack_ascii(raw.as_bytes())?)),
        // A single-quoted key reaches us with the quotes intact; the middle
        // eight characters are the key.
        10 => Ok(DesKey::from(pack_ascii(&raw.as_bytes()[1..9])?)),
        _ => Err(CliError::MalformedKey),
    }
}

fn pack_ascii(bytes: &[u8]) -> Result<[u8; 8], CliError> {
    if bytes.len() != 8 || !bytes.is_ascii() {
        return Err(CliError::MalformedKey);
    }
    Ok(bytes.try_into().expect("length checked above"))
}

fn parse_mode(raw: &str) -> Result<Mode, CliError> {
    if raw.eq_ignore_ascii_case("ecb") {
        Ok(Mode::Ecb)
    } else if raw.eq_ignore_ascii_case("cbc") {
        Ok(Mode::Cbc { iv: DEFAULT_IV })
    } else {
        Err(CliError::UnknownMode(raw.to_string()))
    }
}

/// Seeded once per process from the platform entropy source. Supplies the
/// header's random half and the tail-padding bytes.
fn process_rng() -> ChaCha20Rng {
    let mut seed = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut seed);
    ChaCha20Rng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_key_is_big_endian() {
        assert_eq!(
            parse_key("0123456789ABCDEF").unwrap(),
            DesKey(0x0123_4567_89AB_CDEF)
        );
        assert_eq!(
            parse_key("0123456789abcdef").unwrap(),
            DesKey(0x0123_4567_89AB_CDEF)
        );
    }

    #[test]
    fn ascii_key_packs_first_byte_high() {
        assert_eq!(parse_key("password").unwrap(), DesKey(0x7061_7373_776F_7264));
    }

    #[test]
    fn quoted_ascii_key_strips_bracketing_characters() {
        assert_eq!(
            parse_key("'password'").unwrap(),
            DesKey(0x7061_7373_776F_7264)
        );
    }

    #[test]
    fn sixteen_characters_must_be_hex() {
        assert!(matches!(
            parse_key("0123456789ABCDEG"),
            Err(CliError::MalformedKey)
        ));
    }

    #[test]
    fn other_key_lengths_are_malformed() {
        for raw in ["", "short", "ninechars", "0123456789ABCDEF0"] {
            assert!(matches!(parse_key(raw), Err(CliError::MalformedKey)));
        }
    }

    #[test]
    fn action_is_case_insensitive() {
        assert_eq!(parse_action("-e").unwrap(), Action::Encrypt);
        assert_eq!(parse_action("-E").unwrap(), Action::Encrypt);
        assert_eq!(parse_action("-D").unwrap(), Action::Decrypt);
        assert!(matches!(
            parse_action("-x"),
            Err(CliError::UnknownAction(_))
        ));
    }

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!(parse_mode("ECB").unwrap(), Mode::Ecb);
        assert_eq!(parse_mode("cbc").unwrap(), Mode::Cbc { iv: DEFAULT_IV });
        assert!(matches!(parse_mode("ctr"), Err(CliError::UnknownMode(_))));
    }
}
