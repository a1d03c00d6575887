use super::tokenizer::TokenType;

/// A parse-time diagnostic. Parsing never fails hard: diagnostics accumulate
/// in order on the parser and the offending construct is left out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnexpectedToken {
        expected: TokenType,
        got: TokenType,
    },
    NoPrefixRule(TokenType),
    MalformedInteger(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected, got } => {
                write!(f, "Expected next token to be {expected:?}, got {got:?} instead")
            }
            Self::NoPrefixRule(typ) => {
                write!(f, "No prefix parse function for {typ:?} found")
            }
            Self::MalformedInteger(literal) => {
                write!(f, "Could not parse {literal} as integer")
            }
        }
    }
}
