pub mod op;
pub mod ty;

pub use op::{Implicit, Op};
pub use ty::VarType;
