mod parser;
pub use parser::tokenizer::{Lexer, Token, TokenType};
pub use parser::{BlockStatement, Error, Expression, Identifier, Parser, Program, Statement};

mod interpreter;
pub use interpreter::{evaluate, Environment, Function, Object, ObjectType, ScopeId};
