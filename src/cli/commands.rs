// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations. Each returns its output instead of printing so
//! the tests can check it.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use malachite::Natural;
use tracing::debug;

use scalewire::{
    decode_kind, BoolPolicy, CompactBig, CompactMode, CompactPolicy, Decode, DecodeOptions,
    Encode, Kind, Reader,
};

/// Defaults, then the options file, then `--strict` on top.
pub fn load_options(path: Option<&Path>, strict: bool) -> Result<DecodeOptions> {
    let mut options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid options file {}", path.display()))?
        }
        None => DecodeOptions::default(),
    };
    if strict {
        options.compact = CompactPolicy::Canonical;
        options.booleans = BoolPolicy::Strict;
    }
    debug!(?options, "decode options");
    Ok(options)
}

/// Hex with an optional `0x` prefix; whitespace anywhere is ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("invalid hex input {text:?}"))
}

/// Input bytes from a hex argument or a file, whichever was given.
pub fn read_input(hex: Option<&str>, file: Option<&Path>) -> Result<Vec<u8>> {
    match (hex, file) {
        (Some(hex), None) => parse_hex(hex),
        (None, Some(path)) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => bail!("give either hex input or --input, not both"),
    }
}

pub fn encode_compact(value: &str) -> Result<String> {
    let natural = Natural::from_str(value)
        .map_err(|()| anyhow!("not a non-negative decimal integer: {value:?}"))?;
    let compact = CompactBig::new(natural).context("value too large for a compact integer")?;
    Ok(format!("0x{}", hex::encode(compact.encode())))
}

pub fn decode(kind: &str, bytes: &[u8], options: &DecodeOptions, pretty: bool) -> Result<String> {
    let kind: Kind = kind
        .parse()
        .with_context(|| format!("invalid kind descriptor {kind:?}"))?;
    let value = decode_kind(&kind, bytes, options).with_context(|| format!("decoding as {kind}"))?;
    debug!(shape = value.kind_name(), bytes = bytes.len(), "decoded");
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

/// Layout of the compact integer at the start of an input.
#[derive(Debug)]
pub struct CompactReport {
    pub mode: CompactMode,
    /// The bytes the compact occupies, header included.
    pub bytes: Vec<u8>,
    pub value: Natural,
    /// Length of the shortest encoding of `value`.
    pub minimal_len: usize,
    /// Bytes after the compact.
    pub trailing: usize,
}

impl CompactReport {
    pub fn is_minimal(&self) -> bool {
        self.bytes.len() == self.minimal_len
    }
}

/// Decode the leading compact leniently so non-minimal forms can be shown.
pub fn inspect(bytes: &[u8], options: &DecodeOptions) -> Result<CompactReport> {
    let header = *bytes.first().context("empty input")?;
    let options = DecodeOptions {
        compact: CompactPolicy::Lenient,
        ..*options
    };
    let mut reader = Reader::with_options(bytes, options);
    let value = CompactBig::decode(&mut reader).context("malformed compact prefix")?;
    let used = reader.position();
    Ok(CompactReport {
        mode: CompactMode::from_header(header),
        bytes: bytes[..used].to_vec(),
        minimal_len: value.encoded_size(),
        value: value.into_inner(),
        trailing: reader.remaining(),
    })
}
