use arch::VarType;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Label,
    Proc,
    Var(VarType),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Label => write!(f, "label"),
            Kind::Proc => write!(f, "proc"),
            Kind::Var(ty) => write!(f, "{}", ty),
        }
    }
}

/// Written as one plain word: `label`, `proc` or the variable type.
impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub addr: u16,
    pub kind: Kind,
    pub file: String,
    pub line_idx: usize,
}

/// Name to address map, in definition order.
#[derive(Debug, Default, Clone)]
pub struct Symbols {
    symbols: IndexMap<String, Symbol>,
}

impl Symbols {
    pub fn new() -> Self {
        Symbols {
            symbols: IndexMap::new(),
        }
    }

    /// Returns the previous definition if the name was already known.
    pub fn insert(&mut self, name: String, symbol: Symbol) -> Option<Symbol> {
        self.symbols.insert(name, symbol)
    }

    /// Move an already recorded name by `delta` addresses.
    pub fn shift(&mut self, name: &str, delta: u16) {
        if let Some(entry) = self.symbols.get_mut(name) {
            entry.addr = entry.addr.wrapping_add(delta);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn get_val(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).map(|sym| sym.addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
