//! Hexbox CLI - passphrase-based text encryption
//!
//! Command-line interface for encrypting text into `\x`-prefixed hex
//! envelopes and back, using NaCl secretbox (XSalsa20Poly1305) with scrypt
//! key derivation.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use hexbox::error::{ErrorKind, HexboxError, Result};
use hexbox::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};
use hexbox::{detect, digest, secretcrypt};

#[derive(Parser)]
#[command(name = "hexbox")]
#[command(version)]
#[command(about = "Passphrase-based text encryption.", long_about = None)]
struct Cli {
    /// Read passphrase from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a text file into an envelope
    #[command(alias = "e")]
    Encrypt {
        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the envelope text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decrypt an envelope file back into plaintext
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file whose contents is to be decrypted
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the plaintext to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Report whether a file looks like a hexbox envelope
    Inspect {
        /// Path to the file to inspect
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt { input, output } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            encrypt_file(&input, &output, &mut *reader)
        }
        Commands::Decrypt { input, output } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            decrypt_file(&input, &output, &mut *reader)
        }
        Commands::Inspect { input } => inspect_file(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}

fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let plaintext = read_text(input_path)?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let envelope = secretcrypt::encrypt(&plaintext, &passphrase)
        .map_err(|e| e.context("encryption failed"))?;

    write_text(output_path, &envelope)?;
    println!("{}", digest::hash(&envelope));
    Ok(())
}

fn decrypt_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let envelope = read_text(input_path)?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let plaintext = secretcrypt::decrypt(envelope.trim_end(), &passphrase)
        .map_err(|e| e.context("decryption failed"))?;

    write_text(output_path, &plaintext)?;
    println!("{}", digest::hash(&plaintext));
    Ok(())
}

fn inspect_file(input_path: &Path) -> Result<()> {
    let text = read_text(input_path)?;

    if detect::matches_envelope_format(text.trim_end()) {
        for pattern in detect::PII_PATTERNS {
            if pattern.enabled {
                println!("{}: {}", pattern.name, pattern.description);
            }
        }
    } else {
        println!("no recognized envelope format");
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        HexboxError::with_source(
            ErrorKind::Io,
            format!("failed to read from {}", path.display()),
            e,
        )
    })
}

/// Write output with restrictive permissions (0o600 on Unix); decrypted
/// plaintext is assumed sensitive and envelopes don't mind.
fn write_text(path: &Path, contents: &str) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                HexboxError::with_source(
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents.as_bytes()).map_err(|e| {
            HexboxError::with_source(
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            HexboxError::with_source(
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })
    }
}
