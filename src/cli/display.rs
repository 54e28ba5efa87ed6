// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for `scalewire inspect`.
//!
//! OneDark on dark terminals, One Light on light ones. Colors are only emitted
//! when stdout is a TTY and `NO_COLOR` is unset, so piping the output gives
//! plain box drawing.
//!
//! # Theme detection order
//!
//! 1. `SCALEWIRE_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use super::commands::CompactReport;

/// Width between │ and │ (excluding border chars).
pub const BOX_WIDTH: usize = 60;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn theme_from(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": 0-6 and 8 are dark backgrounds
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg) = bg.parse::<u8>() {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    let explicit = std::env::var("SCALEWIRE_THEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    theme_from(explicit.as_deref(), colorfgbg.as_deref())
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            match theme() {
                Theme::Dark => rgb(onedark::$name),
                Theme::Light => rgb(onelight::$name),
            }
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers, or return plain text.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let b = border();
    let reset = if b.is_empty() { "" } else { RESET };
    format!("{b}│{reset}{content}{}{b}│{reset}", " ".repeat(pad))
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) -> String {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let b = border();
    let reset = if b.is_empty() { "" } else { RESET };
    format!("{b}┌{reset}{label_part}{b}{}┐{reset}", "─".repeat(remaining))
}

/// └──────────────────┘
pub fn section_bot() -> String {
    let b = border();
    let reset = if b.is_empty() { "" } else { RESET };
    format!("{b}└{}┘{reset}", "─".repeat(BOX_WIDTH))
}

fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

const VALUE_WIDTH: usize = BOX_WIDTH - 12;

/// Hex runs longer than a row are cut with an ellipsis.
fn clip(text: String, width: usize) -> String {
    if text.chars().count() <= width {
        return text;
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// The boxed report, one line per element.
pub fn report_lines(report: &CompactReport) -> Vec<String> {
    let field = |name: &str, value: String| {
        let label = themed(GRAY, &[], &format!("{name:<10}"));
        row(&format!(" {label}{value}"))
    };

    let header = report.bytes.first().copied().unwrap_or_default();
    let canonical = if report.is_minimal() {
        themed(GREEN, &[BOLD], "yes")
    } else {
        themed(
            RED,
            &[BOLD],
            &format!("no (minimal form is {} bytes)", report.minimal_len),
        )
    };

    let mut lines = vec![section_top("COMPACT")];
    lines.push(field(
        "header",
        format!("0x{header:02x} (mode bits {:02b})", header & 0b11),
    ));
    lines.push(field("mode", format!("{:?}", report.mode)));
    lines.push(field("bytes", clip(spaced_hex(&report.bytes), VALUE_WIDTH)));
    lines.push(field("length", report.bytes.len().to_string()));
    lines.push(field("value", clip(report.value.to_string(), VALUE_WIDTH)));
    lines.push(field("canonical", canonical));
    if report.trailing > 0 {
        lines.push(field(
            "trailing",
            themed(YELLOW, &[], &format!("{} bytes", report.trailing)),
        ));
    }
    lines.push(section_bot());
    lines
}

pub fn print_report(report: &CompactReport) {
    for line in report_lines(report) {
        println!("{line}");
    }
}
