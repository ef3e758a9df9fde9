use arch::{op::SKIP_FIELD, Op, VarType};
use std::iter::once;

use crate::{lexer, symbol::Symbols};

/// Leading token of every instruction in the target file.
pub const CODE_MARKER: &str = "k";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Code(Vec<String>),
    Var {
        ty: VarType,
        name: Option<String>,
        init: Vec<String>,
    },
}

impl Line {
    pub fn from_tokens(tokens: Vec<String>) -> Line {
        let ty = tokens.first().and_then(|t| VarType::from_marker(t));
        match ty {
            Some(ty) => {
                let mut rest = tokens.into_iter().skip(1);
                Line::Var {
                    ty,
                    name: rest.next(),
                    init: rest.collect(),
                }
            }
            None => Line::Code(tokens),
        }
    }

    /// Unconditional jump over a block of variables.
    pub fn skip_to(target: u16) -> Line {
        Line::Code(vec![
            Op::Jmp.code().to_string(),
            SKIP_FIELD.to_string(),
            target.to_string(),
        ])
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Line::Var { name, .. } => name.as_deref(),
            Line::Code(_) => None,
        }
    }

    /// Tokens as written to the target file, names replaced by addresses.
    ///
    /// The variable's own name is not emitted: the slot is its address.
    pub fn resolve(&self, symbols: &Symbols) -> Vec<String> {
        let lookup = |token: &String| match symbols.get_val(token) {
            Some(addr) => addr.to_string(),
            None => token.clone(),
        };
        match self {
            Line::Code(tokens) => once(CODE_MARKER.to_string())
                .chain(tokens.iter().map(lookup))
                .collect(),
            Line::Var { ty, init, .. } => once(ty.marker().to_string())
                .chain(init.iter().map(lookup))
                .collect(),
        }
    }
}

/// How the first pass treats a tokenized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Empty, `proc` or label line: no address of its own.
    Skip,
    Var,
    Code,
}

pub fn classify(tokens: &[String]) -> Class {
    match tokens.first() {
        None => Class::Skip,
        Some(first) if first == lexer::PROC || lexer::is_label(first) => Class::Skip,
        Some(first) if lexer::is_marker(first) => Class::Var,
        Some(_) => Class::Code,
    }
}
