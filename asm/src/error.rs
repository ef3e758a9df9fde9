use color_print::cprintln;
use indexmap::IndexMap;
use thiserror::Error;

use crate::expr::ExprError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file \"{0}\" for reading")]
    SourceOpen(String, #[source] std::io::Error),

    #[error("Failed to read file \"{0}\"")]
    SourceRead(String, #[source] std::io::Error),

    #[error("Failed to open file \"{0}\" for writing")]
    TargetOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    TargetWrite(String, #[source] std::io::Error),

    #[error("Error evaluating expression `{expr}`: {source}")]
    Expr {
        expr: String,
        #[source]
        source: ExprError,
    },

    #[error("Re-defined symbol: `{0}`")]
    RedefinedSymbol(String),

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Nothing to translate: the program is empty")]
    EmptyProgram,

    #[error("Failed to open config file: {0}")]
    ConfigOpen(String, #[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(String, #[source] serde_yaml::Error),

    #[error("Failed to write symbol map: {0}")]
    SymbolMap(String, #[source] serde_yaml::Error),

    #[error("Failed to launch virtual machine: {0}")]
    VmLaunch(String, #[source] std::io::Error),

    #[error("{source}")]
    Located {
        file: String,
        line_idx: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach a source location, 0-based line index.
    pub fn at(self, file: &str, line_idx: usize) -> Error {
        match self {
            located @ Error::Located { .. } => located,
            other => Error::Located {
                file: file.to_string(),
                line_idx,
                source: Box::new(other),
            },
        }
    }

    /// The error without its location wrapper.
    pub fn kind(&self) -> &Error {
        match self {
            Error::Located { source, .. } => source.kind(),
            other => other,
        }
    }

    pub fn location(&self) -> Option<(&str, usize)> {
        match self {
            Error::Located { file, line_idx, .. } => Some((file.as_str(), *line_idx)),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, files: &IndexMap<String, Vec<String>>) {
        cprintln!("<red,bold>error</>: {}", self.kind());

        let Some((file, line_idx)) = self.location() else {
            return;
        };

        // line_idx is 0-based, display as 1-based
        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        let line_content = files
            .get(file)
            .and_then(|lines| lines.get(line_idx))
            .map(|s| s.as_str())
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
