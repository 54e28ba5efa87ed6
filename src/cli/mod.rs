// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the scalewire command-line interface.
//!
//! Three subcommands: `encode-compact` turns a decimal number into its compact
//! bytes, `decode` reads hex (or a file) against a kind descriptor and prints
//! JSON, and `inspect` breaks a compact prefix down byte by byte. Decoding is
//! lenient unless `--strict` or an `--options` file says otherwise.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scalewire",
    about = "Encode, decode and inspect SCALE-style binary data",
    version
)]
pub struct Cli {
    /// Log verbosity: -v for debug, -vv for trace (written to stderr)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only accept canonical encodings (minimal compacts, 0x00/0x01 booleans)
    #[arg(long, global = true)]
    pub strict: bool,

    /// JSON file with decode options
    ///
    /// Fields (all optional): `compact` ("lenient" | "canonical"),
    /// `booleans` ("lenient" | "strict"), `max_depth`, `max_zero_width`,
    /// `max_compact_bytes`.
    #[arg(long, global = true, value_name = "PATH")]
    pub options: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the compact encoding of a non-negative decimal integer as hex
    EncodeCompact {
        /// Value in [0, 2^536)
        value: String,
    },

    /// Decode bytes against a kind descriptor and print the value as JSON
    Decode {
        /// Kind descriptor, e.g. "Vec<Str>" or "{id: Compact, tags: Map<Str, bool>}"
        #[arg(short, long)]
        kind: String,

        /// Hex input (0x prefix and whitespace allowed)
        #[arg(required_unless_present = "input", conflicts_with = "input")]
        hex: Option<String>,

        /// Read raw bytes from a file instead
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show how the leading compact integer of some hex is laid out
    Inspect {
        /// Hex input (0x prefix and whitespace allowed)
        hex: String,
    },
}
