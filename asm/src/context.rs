use crate::{
    config::{Config, Redefinition},
    error::Error,
    msg::{Diag, Msg},
    symbol::{Kind, Symbol, Symbols},
};

/// Address units taken by one instruction or one variable slot.
pub const STEP: u16 = 2;

/// State of one translation: symbol table, address cursor and entry point.
///
/// A fresh context is built for every translation, nothing is shared between
/// two calls.
#[derive(Debug)]
pub struct Context {
    pub symbols: Symbols,
    cursor: u16,
    start: u16,
    redefinition: Redefinition,
    file: String,
    line_idx: usize,
    diags: Vec<Diag>,
}

impl Context {
    pub fn new(config: &Config) -> Self {
        Context {
            symbols: Symbols::new(),
            cursor: 0,
            start: 0,
            redefinition: config.redefinition,
            file: String::new(),
            line_idx: 0,
            diags: vec![],
        }
    }

    /// Set the source position that new definitions are attributed to.
    pub fn locate(&mut self, file: &str, line_idx: usize) {
        if self.file != file {
            self.file = file.to_string();
        }
        self.line_idx = line_idx;
    }

    pub fn cursor(&self) -> u16 {
        self.cursor
    }

    pub fn advance(&mut self) {
        self.cursor = self.cursor.wrapping_add(STEP);
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn mark_start(&mut self) {
        log::debug!("program starts at {}", self.cursor);
        self.start = self.cursor;
    }

    /// Record `name` at the current cursor.
    pub fn define(&mut self, name: &str, kind: Kind) -> Result<(), Error> {
        log::trace!("{:?} `{}` at {}", kind, name, self.cursor);
        let symbol = Symbol {
            addr: self.cursor,
            kind,
            file: self.file.clone(),
            line_idx: self.line_idx,
        };
        let Some(prev) = self.symbols.insert(name.to_string(), symbol) else {
            return Ok(());
        };
        match self.redefinition {
            Redefinition::Overwrite => Ok(()),
            Redefinition::Warn => {
                self.diags.push(
                    Msg::Warn(format!("Re-defined symbol: `{}`", name))
                        .at(&self.file, self.line_idx),
                );
                self.diags.push(
                    Msg::Note(format!(
                        "Already defined here at {}. The value has been overridden.",
                        prev.addr
                    ))
                    .at(&prev.file, prev.line_idx),
                );
                Ok(())
            }
            Redefinition::Error => Err(Error::RedefinedSymbol(name.to_string())),
        }
    }

    pub fn into_parts(self) -> (Symbols, u16, Vec<Diag>) {
        (self.symbols, self.start, self.diags)
    }
}
