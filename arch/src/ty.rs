use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Storage type of a variable slot.
///
/// Source code spells it as a keyword (`uint`), the target file as a
/// one-letter marker (`u`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Uint,
    Int,
    Float,
}

impl VarType {
    pub fn keyword(s: &str) -> Option<VarType> {
        s.parse().ok()
    }

    pub fn marker(&self) -> &'static str {
        match self {
            VarType::Uint => "u",
            VarType::Int => "i",
            VarType::Float => "f",
        }
    }

    pub fn from_marker(s: &str) -> Option<VarType> {
        match s {
            "u" => Some(VarType::Uint),
            "i" => Some(VarType::Int),
            "f" => Some(VarType::Float),
            _ => None,
        }
    }
}

#[test]
fn test() {
    assert_eq!(VarType::keyword("uint"), Some(VarType::Uint));
    assert_eq!(VarType::keyword("float"), Some(VarType::Float));
    assert_eq!(VarType::keyword("u"), None);
    assert_eq!(VarType::from_marker("i"), Some(VarType::Int));
    assert_eq!(VarType::Float.marker(), "f");
    assert_eq!(VarType::Int.to_string(), "int");
}
