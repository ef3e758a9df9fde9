use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::Error;

/// Target file text: tokens joined by single spaces, one line each.
pub fn render(lines: &[Vec<String>]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Create or truncate `target` and write every line to it.
pub fn write(target: &str, lines: &[Vec<String>]) -> Result<(), Error> {
    let file = File::create(target).map_err(|e| Error::TargetOpen(target.to_string(), e))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{}", line.join(" "))
            .map_err(|e| Error::TargetWrite(target.to_string(), e))?;
    }
    out.flush()
        .map_err(|e| Error::TargetWrite(target.to_string(), e))
}
