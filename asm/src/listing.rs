use color_print::cformat;
use std::fmt::Write;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    error::Error,
    symbol::Kind,
    translate::{Output, Program},
};

/// Every source line next to the address and target text it produced.
pub fn render_dump(source: &[String], output: &Output) -> String {
    let path = &output.program.file;
    let mut text = String::new();
    let _ = writeln!(
        text,
        "{}+------[{}]{}",
        "-".repeat(23),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    let mut next = 0;
    for (unit, code) in output.program.units.iter().zip(&output.code) {
        let target = cformat!("<y>{:<16}</>", code.join(" "));
        let addr = cformat!("<c>[{:04}]</>", unit.addr);
        match unit.src {
            Some(idx) => {
                for (skipped, raw) in source.iter().enumerate().take(idx).skip(next) {
                    source_row(&mut text, skipped, raw);
                }
                let raw = source.get(idx).map(String::as_str).unwrap_or("");
                let _ = writeln!(text, "{} {} | {:>4}: {}", addr, target, idx + 1, raw);
                next = idx + 1;
            }
            None => {
                let _ = writeln!(
                    text,
                    "{} {} |       {}",
                    addr,
                    target,
                    cformat!("<g>(skip variables)</>")
                );
            }
        }
    }
    for (idx, raw) in source.iter().enumerate().skip(next) {
        source_row(&mut text, idx, raw);
    }
    let _ = writeln!(
        text,
        "-----------------------+-----------------------------------------------------"
    );
    text
}

pub fn print_dump(source: &[String], output: &Output) {
    print!("{}", render_dump(source, output));
}

fn source_row(text: &mut String, idx: usize, raw: &str) {
    let _ = writeln!(text, "{:23}| {:>4}: {}", "", idx + 1, raw);
}

#[derive(Debug, Serialize)]
pub struct SymbolMap {
    pub start: u16,
    pub symbols: IndexMap<String, Entry>,
}

#[derive(Debug, Serialize)]
pub struct Entry {
    pub addr: u16,
    pub kind: Kind,
    pub file: String,
    pub line: usize,
}

impl SymbolMap {
    pub fn generate(program: &Program) -> Self {
        let symbols = program
            .symbols
            .iter()
            .map(|(name, sym)| {
                (
                    name.clone(),
                    Entry {
                        addr: sym.addr,
                        kind: sym.kind,
                        file: sym.file.clone(),
                        line: sym.line_idx + 1,
                    },
                )
            })
            .collect();
        SymbolMap {
            start: program.start,
            symbols,
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn write(&self, path: &str) -> Result<(), Error> {
        let yaml = self
            .to_yaml()
            .map_err(|e| Error::SymbolMap(path.to_string(), e))?;
        std::fs::write(path, yaml).map_err(|e| Error::TargetWrite(path.to_string(), e))
    }
}
