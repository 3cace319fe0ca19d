//! Line-oriented prompting over any reader/writer pair

use std::io::{BufRead, Write};

use crate::error::LedgerResult;

/// Print `prompt`, then read one trimmed line
///
/// Returns `None` once the input is exhausted.
pub fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> LedgerResult<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
