use super::environment::ScopeId;
use crate::parser::ast::{BlockStatement, Identifier};
use std::fmt;
use std::rc::Rc;

/// A runtime value. `Return` is a transient control-flow carrier that only
/// exists while unwinding to the nearest function or program boundary; it is
/// never stored in a variable.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i32),
    Boolean(bool),
    Str(Rc<String>),
    Null,
    Function(Rc<Function>),
    Return(Box<Object>),
}

/// A function value: parameter names, the body, and the scope active when
/// the literal was evaluated. The scope is captured by handle, not copied,
/// so later bindings in the defining scope are visible on every call.
#[derive(Debug)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub scope: ScopeId,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObjectType {
    Integer,
    Boolean,
    Str,
    Null,
    Function,
    ReturnValue,
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Integer(_) => ObjectType::Integer,
            Self::Boolean(_) => ObjectType::Boolean,
            Self::Str(_) => ObjectType::Str,
            Self::Null => ObjectType::Null,
            Self::Function(_) => ObjectType::Function,
            Self::Return(_) => ObjectType::ReturnValue,
        }
    }

    /// Textual rendering shown by the REPL.
    pub fn inspect(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Str(value) => value.as_ref().clone(),
            Self::Null => "null".to_string(),
            Self::Function(_) => "function(...)".to_string(),
            Self::Return(value) => value.inspect(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}
