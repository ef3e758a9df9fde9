use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::{
    config::{Config, Unresolved},
    context::{Context, STEP},
    emit,
    error::Error,
    lexer,
    line::{classify, Class, Line},
    msg::Diag,
    symbol::Symbols,
};

/// One emitted line with the address it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub line: Line,
    pub addr: u16,
    /// Source line index, `None` for synthesized instructions.
    pub src: Option<usize>,
}

/// Result of the first pass.
#[derive(Debug)]
pub struct Program {
    pub file: String,
    pub units: Vec<Unit>,
    pub symbols: Symbols,
    pub start: u16,
    pub diags: Vec<Diag>,
}

/// A finished translation: the first-pass program and the resolved target lines.
#[derive(Debug)]
pub struct Output {
    pub program: Program,
    pub code: Vec<Vec<String>>,
}

pub struct Translator {
    config: Config,
}

impl Translator {
    pub fn new(config: Config) -> Self {
        Translator { config }
    }

    pub fn translate(&self, file: &str, lines: &[String]) -> Result<Output, Error> {
        let program = self.first_pass(file, lines)?;
        if program.units.is_empty() {
            return Err(Error::EmptyProgram);
        }
        let code = self.second_pass(&program)?;
        Ok(Output { program, code })
    }

    pub fn translate_file(&self, path: &str) -> Result<Output, Error> {
        let lines = read_source(path)?;
        self.translate(path, &lines)
    }

    /// Tokenize every line, assign addresses and collect the symbol table.
    pub fn first_pass(&self, file: &str, lines: &[String]) -> Result<Program, Error> {
        let mut ctx = Context::new(&self.config);
        let mut units = vec![];
        let mut iter = lines.iter().enumerate();

        while let Some((idx, raw)) = iter.next() {
            ctx.locate(file, idx);
            let addr = ctx.cursor();
            let tokens = lexer::tokenize(&mut ctx, raw).map_err(|e| e.at(file, idx))?;
            match classify(&tokens) {
                Class::Skip => {}
                Class::Code => units.push(Unit {
                    line: Line::Code(tokens),
                    addr,
                    src: Some(idx),
                }),
                Class::Var => {
                    let first = Unit {
                        line: Line::from_tokens(tokens),
                        addr,
                        src: Some(idx),
                    };
                    units.extend(var_block(&mut ctx, file, first, &mut iter)?);
                }
            }
        }

        let (symbols, start, diags) = ctx.into_parts();
        log::debug!("first pass: {} lines, {} symbols", units.len(), symbols.len());
        Ok(Program {
            file: file.to_string(),
            units,
            symbols,
            start,
            diags,
        })
    }

    /// Replace every name by its address.
    pub fn second_pass(&self, program: &Program) -> Result<Vec<Vec<String>>, Error> {
        program
            .units
            .iter()
            .map(|unit| {
                let resolved = unit.line.resolve(&program.symbols);
                if self.config.unresolved == Unresolved::Error {
                    if let Some(name) = resolved.iter().skip(1).find(|t| !lexer::is_number(t)) {
                        let err = Error::UndefinedSymbol(name.clone());
                        return Err(match unit.src {
                            Some(idx) => err.at(&program.file, idx),
                            None => err,
                        });
                    }
                }
                Ok(resolved)
            })
            .collect()
    }
}

/// Collect a run of variable definitions and put a jump over them.
///
/// `first` is already tokenized, so its name was recorded at the address the
/// jump now takes: it moves one step up. The block ends at the first other
/// line; a code line there closes the block and is the jump target.
fn var_block<'a, I>(
    ctx: &mut Context,
    file: &str,
    mut first: Unit,
    iter: &mut I,
) -> Result<Vec<Unit>, Error>
where
    I: Iterator<Item = (usize, &'a String)>,
{
    let jump_addr = first.addr;
    ctx.advance();
    first.addr = first.addr.wrapping_add(STEP);
    if let Some(name) = first.line.name() {
        ctx.symbols.shift(name, STEP);
    }

    let mut block = vec![first];
    let mut closing = None;
    for (idx, raw) in iter.by_ref() {
        ctx.locate(file, idx);
        let addr = ctx.cursor();
        let tokens = lexer::tokenize(ctx, raw).map_err(|e| e.at(file, idx))?;
        if tokens.is_empty() {
            continue;
        }
        match classify(&tokens) {
            Class::Var => block.push(Unit {
                line: Line::from_tokens(tokens),
                addr,
                src: Some(idx),
            }),
            // A label or `proc` ends the block at its own address.
            Class::Skip => break,
            Class::Code => {
                closing = Some(Unit {
                    line: Line::Code(tokens),
                    addr,
                    src: Some(idx),
                });
                break;
            }
        }
    }

    let target = closing.as_ref().map(|unit| unit.addr).unwrap_or(ctx.cursor());
    log::debug!(
        "{} variables at {}, skipped to {}",
        block.len(),
        jump_addr.wrapping_add(STEP),
        target
    );

    let mut units = Vec::with_capacity(block.len() + 2);
    units.push(Unit {
        line: Line::skip_to(target),
        addr: jump_addr,
        src: None,
    });
    units.extend(block);
    units.extend(closing);
    Ok(units)
}

pub fn read_source(path: &str) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::SourceOpen(path.to_string(), e))?;
    BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::SourceRead(path.to_string(), e))
}

/// Translate `source` and write the result to `target`.
///
/// Nothing is written when the translation fails.
pub fn asm_to_code(source: &str, target: &str, config: Config) -> Result<Output, Error> {
    let output = Translator::new(config).translate_file(source)?;
    emit::write(target, &output.code)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(|l| l.to_string()).collect()
    }

    fn translate(src: &str) -> Output {
        Translator::new(Config::default())
            .translate("test.asm", &lines(src))
            .unwrap()
    }

    #[test]
    fn unit_addresses() {
        let out = translate("start\nread a\nuint x 1\nuint y\nprint x\nend");
        let addrs: Vec<_> = out.program.units.iter().map(|u| u.addr).collect();
        assert_eq!(addrs, vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(out.program.units[1].src, None);
        assert_eq!(out.program.symbols.get_val("x"), Some(4));
        assert_eq!(out.program.symbols.get_val("y"), Some(6));
    }

    #[test]
    fn block_ended_by_label() {
        let out = translate("uint x 1\nloop:\ninc x\njmp loop");
        let code: Vec<String> = out.code.iter().map(|l| l.join(" ")).collect();
        assert_eq!(code, vec!["k 1 3 4", "u 1", "k 40 2", "k 1 0 4"]);
    }

    #[test]
    fn block_at_end_of_file() {
        let out = translate("read a\nint x\nint y 5");
        let code: Vec<String> = out.code.iter().map(|l| l.join(" ")).collect();
        assert_eq!(code, vec!["k 42 a", "k 1 3 8", "i", "i 5"]);
    }

    #[test]
    fn located_expression_error() {
        let err = Translator::new(Config::default())
            .translate("test.asm", &lines("read a\n\nload a (1+2"))
            .unwrap_err();
        assert_eq!(err.location(), Some(("test.asm", 2)));
        assert!(matches!(err.kind(), Error::Expr { .. }));
    }

    #[test]
    fn empty_program() {
        let err = Translator::new(Config::default())
            .translate("test.asm", &lines("# nothing\nstart\nmain:\n"))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyProgram));
    }

    #[test]
    fn strict_accepts_literals() {
        let out = Translator::new(Config::strict())
            .translate("test.asm", &lines("start\nfloat pi 3.14\nint n -2\nload pi 1e2\nend"))
            .unwrap();
        let code: Vec<String> = out.code.iter().map(|l| l.join(" ")).collect();
        assert_eq!(code, vec!["k 1 3 6", "f 3.14", "i -2", "k 23 2 1e2", "k 0 0"]);
    }

    #[test]
    fn unreadable_lines() {
        let path = std::env::temp_dir().join(format!("vmasm-utf8-{}.asm", std::process::id()));
        std::fs::write(&path, b"start\nread \xff\xfe\n").unwrap();
        let path = path.to_str().unwrap();
        let err = read_source(path).unwrap_err();
        assert!(matches!(&err, Error::SourceRead(p, _) if p == path));
        assert!(err.to_string().contains(path));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn strict_unresolved() {
        let err = Translator::new(Config::strict())
            .translate("test.asm", &lines("read a\nprint a"))
            .unwrap_err();
        assert!(matches!(err.kind(), Error::UndefinedSymbol(name) if name == "a"));
        assert_eq!(err.location(), Some(("test.asm", 0)));
    }
}
