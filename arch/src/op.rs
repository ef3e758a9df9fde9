use bimap::BiMap;
use num_enum::IntoPrimitive;
use once_cell::sync::Lazy;
use std::fmt;
use strum::{EnumCount, EnumIter};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum Op {
    #[default]
    End,
    Jmp,
    Je,
    Jeu,
    Jef,
    Jg,
    Jgu,
    Jgf,
    Jl,
    Jlu,
    Jlf,
    Jne,
    Jneu,
    Jnef,
    Jge,
    Jgeu,
    Jgef,
    Jle,
    Jleu,
    Jlef,
    Print,
    Printu,
    Printf,
    Load,
    Neg,
    Negf,
    Cmp,
    Cmpu,
    Cmpf,
    Add,
    Addf,
    Sub,
    Subf,
    Mul,
    Mulf,
    Divu,
    Div,
    Divf,
    Modu,
    Mod,
    Inc,
    Dec,
    Read,
    Readu,
    Readf,
    And,
    Or,
    Xor,
    Not,
    Loadr,
    Loadrv,
    Call,
    Loadf,
    Setf,
    Endp,
}

static OP_STR: Lazy<BiMap<Op, &'static str>> = Lazy::new(|| {
    let mut map: BiMap<Op, &'static str> = BiMap::new();
    map.insert(Op::End, "end");
    map.insert(Op::Jmp, "jmp");
    map.insert(Op::Je, "je");
    map.insert(Op::Jeu, "jeu");
    map.insert(Op::Jef, "jef");
    map.insert(Op::Jg, "jg");
    map.insert(Op::Jgu, "jgu");
    map.insert(Op::Jgf, "jgf");
    map.insert(Op::Jl, "jl");
    map.insert(Op::Jlu, "jlu");
    map.insert(Op::Jlf, "jlf");
    map.insert(Op::Jne, "jne");
    map.insert(Op::Jneu, "jneu");
    map.insert(Op::Jnef, "jnef");
    map.insert(Op::Jge, "jge");
    map.insert(Op::Jgeu, "jgeu");
    map.insert(Op::Jgef, "jgef");
    map.insert(Op::Jle, "jle");
    map.insert(Op::Jleu, "jleu");
    map.insert(Op::Jlef, "jlef");
    map.insert(Op::Print, "print");
    map.insert(Op::Printu, "printu");
    map.insert(Op::Printf, "printf");
    map.insert(Op::Load, "load");
    map.insert(Op::Neg, "neg");
    map.insert(Op::Negf, "negf");
    map.insert(Op::Cmp, "cmp");
    map.insert(Op::Cmpu, "cmpu");
    map.insert(Op::Cmpf, "cmpf");
    map.insert(Op::Add, "add");
    map.insert(Op::Addf, "addf");
    map.insert(Op::Sub, "sub");
    map.insert(Op::Subf, "subf");
    map.insert(Op::Mul, "mul");
    map.insert(Op::Mulf, "mulf");
    map.insert(Op::Divu, "divu");
    map.insert(Op::Div, "div");
    map.insert(Op::Divf, "divf");
    map.insert(Op::Modu, "modu");
    map.insert(Op::Mod, "mod");
    map.insert(Op::Inc, "inc");
    map.insert(Op::Dec, "dec");
    map.insert(Op::Read, "read");
    map.insert(Op::Readu, "readu");
    map.insert(Op::Readf, "readf");
    map.insert(Op::And, "and");
    map.insert(Op::Or, "or");
    map.insert(Op::Xor, "xor");
    map.insert(Op::Not, "not");
    map.insert(Op::Loadr, "loadr");
    map.insert(Op::Loadrv, "loadrv");
    map.insert(Op::Call, "call");
    map.insert(Op::Loadf, "loadf");
    map.insert(Op::Setf, "setf");
    map.insert(Op::Endp, "endp");
    map
});

/// Operand appended by the assembler right after the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implicit {
    /// `end` jumps back to the program entry point.
    StartAddr,
    /// Jumps carry an unused register field.
    Zero,
}

/// Register field of the unconditional jump inserted in front of variable blocks.
pub const SKIP_FIELD: u8 = 3;

impl Op {
    /// Exact, case-sensitive lookup of a mnemonic.
    pub fn parse(s: &str) -> Option<Op> {
        OP_STR.get_by_right(s).copied()
    }

    pub fn format(&self) -> &'static str {
        OP_STR.get_by_left(self).copied().unwrap_or("???")
    }

    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn implicit(&self) -> Option<Implicit> {
        match self.code() {
            0 => Some(Implicit::StartAddr),
            1..=19 => Some(Implicit::Zero),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_op_has_a_mnemonic() {
        assert_eq!(OP_STR.len(), Op::COUNT);
        for op in Op::iter() {
            assert_eq!(Op::parse(op.format()), Some(op));
        }
    }

    #[test]
    fn codes_follow_table_order() {
        assert_eq!(Op::parse("end").map(Op::code), Some(0));
        assert_eq!(Op::parse("jmp").map(Op::code), Some(1));
        assert_eq!(Op::parse("jlef").map(Op::code), Some(19));
        assert_eq!(Op::parse("print").map(Op::code), Some(20));
        assert_eq!(Op::parse("call").map(Op::code), Some(51));
        assert_eq!(Op::parse("endp").map(Op::code), Some(54));
        assert_eq!(Op::Div.code(), 36);
        assert_eq!(Op::iter().map(Op::code).max(), Some(54));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Op::parse("ADD"), None);
        assert_eq!(Op::parse("add "), None);
        assert_eq!(Op::parse("uint"), None);
    }

    #[test]
    fn implicit_operands() {
        assert_eq!(Op::End.implicit(), Some(Implicit::StartAddr));
        assert_eq!(Op::Jmp.implicit(), Some(Implicit::Zero));
        assert_eq!(Op::Jlef.implicit(), Some(Implicit::Zero));
        assert_eq!(Op::Print.implicit(), None);
        assert_eq!(Op::Endp.implicit(), None);
    }
}
