pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod line;
pub mod listing;
pub mod msg;
pub mod symbol;
pub mod translate;

pub use config::Config;
pub use error::Error;
pub use translate::{asm_to_code, Output, Program, Translator};
