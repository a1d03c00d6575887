pub(crate) mod ast;
mod error;
mod grammar;
pub mod tokenizer;

pub use ast::{BlockStatement, Expression, Identifier, Program, Statement};
pub use error::Error;
pub use grammar::Parser;
