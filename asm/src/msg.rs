use color_print::cprintln;
use indexmap::IndexMap;

/// Non-fatal diagnostic collected during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Warn(String),
    Note(String),
}

/// A message together with the place it refers to, 0-based line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub msg: Msg,
    pub file: String,
    pub line_idx: usize,
}

impl Msg {
    pub fn at(self, file: &str, line_idx: usize) -> Diag {
        Diag {
            msg: self,
            file: file.to_string(),
            line_idx,
        }
    }
}

impl Diag {
    pub fn print(&self, files: &IndexMap<String, Vec<String>>) {
        match &self.msg {
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
        let raw = files
            .get(&self.file)
            .and_then(|lines| lines.get(self.line_idx))
            .map(|s| s.as_str())
            .unwrap_or("");
        let line = self.line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", self.file, line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line, raw);
        cprintln!("      <blue>|</>");
    }
}
