//! Colored one-line console messages

use crossterm::style::{StyledContent, Stylize};
use std::io::{self, Write};

/// Message kinds, each with its own color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Green
    Success,
    /// Yellow
    Warning,
    /// Red
    Deny,
    /// Blue
    Information,
}

/// Apply the tone's color to a message
pub fn styled(tone: Tone, message: &str) -> StyledContent<String> {
    let message = message.to_string();
    match tone {
        Tone::Success => message.green(),
        Tone::Warning => message.yellow(),
        Tone::Deny => message.red(),
        Tone::Information => message.blue(),
    }
}

/// Write a colored message followed by a newline
pub fn say<W: Write>(out: &mut W, tone: Tone, message: &str) -> io::Result<()> {
    writeln!(out, "{}", styled(tone, message))
}

pub fn success<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    say(out, Tone::Success, message)
}

pub fn warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    say(out, Tone::Warning, message)
}

pub fn deny<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    say(out, Tone::Deny, message)
}

pub fn information<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    say(out, Tone::Information, message)
}
