use super::tokenizer::Token;
use std::fmt;

/// Root of every parse: an ordered sequence of top-level statements with no
/// scope of its own.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        let value = token.lexeme.clone();
        Self { token, value }
    }

    pub fn token_literal(&self) -> &str {
        &self.token.lexeme
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token_literal(&self) -> &str {
        &self.token.lexeme
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Children the parser may fail to produce are `Option`s: a diagnostic is
/// reported and the missing slot stays empty while parsing continues.
#[derive(Debug, Clone)]
pub enum Statement {
    Let {
        token: Token,
        name: Identifier,
        value: Option<Expression>,
    },
    Return {
        token: Token,
        value: Option<Expression>,
    },
    Expression {
        token: Token,
        expression: Option<Expression>,
    },
    Block(BlockStatement),
    While {
        token: Token,
        condition: Option<Expression>,
        body: BlockStatement,
    },
    For {
        token: Token,
        init: Option<Box<Statement>>,
        condition: Option<Expression>,
        increment: Option<Box<Statement>>,
        body: BlockStatement,
    },
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Let { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. }
            | Self::While { token, .. }
            | Self::For { token, .. } => &token.lexeme,
            Self::Block(block) => block.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => {
                write!(f, "{} {} = ", self.token_literal(), name)?;
                if let Some(value) = value {
                    write!(f, "{value}")?;
                }
                write!(f, ";")
            }
            Self::Return { value, .. } => {
                write!(f, "{}", self.token_literal())?;
                if let Some(value) = value {
                    write!(f, " {value}")?;
                }
                write!(f, ";")
            }
            Self::Expression { expression, .. } => {
                if let Some(expression) = expression {
                    write!(f, "{expression}")?;
                }
                Ok(())
            }
            Self::Block(block) => write!(f, "{block}"),
            Self::While {
                condition, body, ..
            } => {
                write!(f, "{} ", self.token_literal())?;
                if let Some(condition) = condition {
                    write!(f, "{condition}")?;
                }
                write!(f, " {body}")
            }
            Self::For {
                init,
                condition,
                increment,
                body,
                ..
            } => {
                write!(f, "{} (", self.token_literal())?;
                if let Some(init) = init {
                    write!(f, "{init}")?;
                }
                write!(f, "; ")?;
                if let Some(condition) = condition {
                    write!(f, "{condition}")?;
                }
                write!(f, "; ")?;
                if let Some(increment) = increment {
                    write!(f, "{increment}")?;
                }
                write!(f, ") {body}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i32,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Option<Box<Expression>>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: String,
        right: Option<Box<Expression>>,
    },
    If {
        token: Token,
        condition: Option<Box<Expression>>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Identifier(identifier) => identifier.token_literal(),
            Self::IntegerLiteral { token, .. }
            | Self::BooleanLiteral { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::If { token, .. }
            | Self::FunctionLiteral { token, .. }
            | Self::Call { token, .. } => &token.lexeme,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::BooleanLiteral { token, .. } => write!(f, "{}", token.lexeme),
            Self::Prefix {
                operator, right, ..
            } => {
                write!(f, "({operator}")?;
                if let Some(right) = right {
                    write!(f, "{right}")?;
                }
                write!(f, ")")
            }
            Self::Infix {
                left,
                operator,
                right,
                ..
            } => {
                write!(f, "({left} {operator} ")?;
                if let Some(right) = right {
                    write!(f, "{right}")?;
                }
                write!(f, ")")
            }
            Self::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if")?;
                if let Some(condition) = condition {
                    write!(f, "{condition}")?;
                }
                write!(f, " {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, "else {alternative}")?;
                }
                Ok(())
            }
            Self::FunctionLiteral {
                parameters, body, ..
            } => {
                write!(f, "{}(", self.token_literal())?;
                for (i, parameter) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, "){body}")
            }
            Self::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{function}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
        }
    }
}
