use arch::{Implicit, Op, VarType};

use crate::{
    context::Context,
    error::Error,
    expr::{evaluate, is_expression},
    symbol::Kind,
};

pub const PROC: &str = "proc";
pub const START: &str = "start";
pub const COMMENT: &str = "#";
pub const LABEL_DELIMITER: char = ':';

/// Split one source line and translate every word it can.
///
/// Mnemonics become opcodes, type keywords become markers, new names are
/// recorded at the cursor and constant expressions are folded. Names that
/// are used rather than defined are left for the second pass.
pub fn tokenize(ctx: &mut Context, raw: &str) -> Result<Vec<String>, Error> {
    let mut tokens: Vec<String> = vec![];
    for word in split(raw) {
        let prev = tokens.last().map(|s| s.as_str());
        let words = substitute(ctx, word, prev)?;
        tokens.extend(words);
    }
    allocate(ctx, &mut tokens);
    Ok(tokens)
}

/// Words of a line up to a bare `#`.
pub fn split(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ' ' || c == ',' || c == '\t')
        .filter(|word| !word.is_empty())
        .take_while(|word| *word != COMMENT)
}

pub fn is_label(token: &str) -> bool {
    token.ends_with(LABEL_DELIMITER)
}

pub fn is_marker(token: &str) -> bool {
    VarType::from_marker(token).is_some()
}

/// A word that could name an address.
pub fn is_name(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// An integer or float literal the VM can read as is.
pub fn is_number(token: &str) -> bool {
    let spelled = token
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E');
    !spelled && (token.parse::<i64>().is_ok() || token.parse::<f64>().is_ok())
}

fn substitute(ctx: &mut Context, word: &str, prev: Option<&str>) -> Result<Vec<String>, Error> {
    // 1. Mnemonic
    if let Some(op) = Op::parse(word) {
        let mut words = vec![op.code().to_string()];
        match op.implicit() {
            Some(Implicit::StartAddr) => words.push(ctx.start().to_string()),
            Some(Implicit::Zero) => words.push("0".to_string()),
            None => {}
        }
        return Ok(words);
    }

    // 2. Type keyword
    if let Some(ty) = VarType::keyword(word) {
        return Ok(vec![ty.marker().to_string()]);
    }

    // 3. New name or constant expression
    let label = word.strip_suffix(LABEL_DELIMITER);
    let kind = match (label, prev) {
        (Some(_), _) => Some(Kind::Label),
        (None, Some(PROC)) => Some(Kind::Proc),
        (None, Some(prev)) => VarType::from_marker(prev).map(Kind::Var),
        (None, None) => None,
    };
    match kind {
        Some(kind) if is_name(word) => {
            ctx.define(label.unwrap_or(word), kind)?;
            Ok(vec![word.to_string()])
        }
        _ if is_expression(word) => {
            let value = evaluate(word).map_err(|source| Error::Expr {
                expr: word.to_string(),
                source,
            })?;
            Ok(vec![value.to_string()])
        }
        _ => Ok(vec![word.to_string()]),
    }
}

/// Move the cursor according to what the line starts with.
fn allocate(ctx: &mut Context, tokens: &mut Vec<String>) {
    let Some(first) = tokens.first() else {
        return;
    };
    if first == START {
        ctx.mark_start();
        tokens.clear();
    } else if !is_label(first)
        && (first.starts_with(|c: char| c.is_ascii_digit()) || is_marker(first))
    {
        ctx.advance();
    }
}
