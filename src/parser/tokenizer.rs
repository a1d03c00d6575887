use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Token {
    pub typ: TokenType,
    pub lexeme: String,
}

impl Token {
    pub fn new(typ: TokenType, lexeme: impl Into<String>) -> Self {
        Self {
            typ,
            lexeme: lexeme.into(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenType {
    // operators
    EQUAL,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    // comparators
    EQEQUAL,
    NOTEQUAL,
    LESS,
    LESSEQUAL,
    GREATER,
    GREATEREQUAL,
    // logical
    EXCLAMATION,
    // keywords
    LET,
    FUNCTION,
    IF,
    ELSE,
    RETURN,
    TRUE,
    FALSE,
    FOR,
    WHILE,
    // delimiters
    COMMA,
    SEMI,
    LPAR,
    RPAR,
    LBRACE,
    RBRACE,
    // literals
    IDENT,
    INT,
    STRING,
    // specials
    ENDMARKER,
    ERRORTOKEN,
}

impl Default for TokenType {
    fn default() -> Self {
        Self::ERRORTOKEN
    }
}

const EQEQUAL: (&str, TokenType) = ("==", TokenType::EQEQUAL);
const NOTEQUAL: (&str, TokenType) = ("!=", TokenType::NOTEQUAL);
const LESSEQUAL: (&str, TokenType) = ("<=", TokenType::LESSEQUAL);
const GREATEREQUAL: (&str, TokenType) = (">=", TokenType::GREATEREQUAL);
const EQUAL: (&str, TokenType) = ("=", TokenType::EQUAL);
const EXCLAMATION: (&str, TokenType) = ("!", TokenType::EXCLAMATION);
const LESS: (&str, TokenType) = ("<", TokenType::LESS);
const GREATER: (&str, TokenType) = (">", TokenType::GREATER);
const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const STAR: (&str, TokenType) = ("*", TokenType::STAR);
const SLASH: (&str, TokenType) = ("/", TokenType::SLASH);
const COMMA: (&str, TokenType) = (",", TokenType::COMMA);
const SEMI: (&str, TokenType) = (";", TokenType::SEMI);
const LPAR: (&str, TokenType) = ("(", TokenType::LPAR);
const RPAR: (&str, TokenType) = (")", TokenType::RPAR);
const LBRACE: (&str, TokenType) = ("{", TokenType::LBRACE);
const RBRACE: (&str, TokenType) = ("}", TokenType::RBRACE);

// Two-character operators must come before their one-character prefixes.
const SIMPLE_TOKENS: [(&str, TokenType); 18] = [
    EQEQUAL,
    NOTEQUAL,
    LESSEQUAL,
    GREATEREQUAL,
    EQUAL,
    EXCLAMATION,
    LESS,
    GREATER,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    COMMA,
    SEMI,
    LPAR,
    RPAR,
    LBRACE,
    RBRACE,
];

const S_WHITESPACE: &str = r"^\s+";
const S_IDENT_START: &str = r"[\p{Alphabetic}_]";
const S_IDENT_CONTINUE: &str = r"[\p{Alphabetic}\p{Nd}_]";
const S_IDENT: &str = concatcp!("^", S_IDENT_START, S_IDENT_CONTINUE, "*");
const S_NUMBER: &str = r"^[0-9]+";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(S_IDENT).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));

static KEYWORDS: Lazy<HashMap<&str, TokenType>> = Lazy::new(|| {
    HashMap::from([
        ("let", TokenType::LET),
        ("function", TokenType::FUNCTION),
        ("if", TokenType::IF),
        ("else", TokenType::ELSE),
        ("return", TokenType::RETURN),
        ("true", TokenType::TRUE),
        ("false", TokenType::FALSE),
        ("for", TokenType::FOR),
        ("while", TokenType::WHILE),
    ])
});

fn lookup_keyword(literal: &str) -> TokenType {
    KEYWORDS.get(literal).copied().unwrap_or(TokenType::IDENT)
}

/// Produces tokens from source text on demand, one call per token.
/// Never fails: unrecognized characters come back as `ERRORTOKEN` and
/// exhausted input yields `ENDMARKER` forever.
pub struct Lexer {
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            pos: 0,
        }
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(m) = WHITESPACE.find(&self.source[self.pos..]) {
            self.pos += m.end();
        }
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return Token::new(TokenType::ENDMARKER, "");
        }
        if let Some(m) = IDENT.find(rest) {
            let lexeme = m.as_str().to_string();
            self.pos += m.end();
            return Token::new(lookup_keyword(&lexeme), lexeme);
        }
        if let Some(m) = NUMBER.find(rest) {
            let lexeme = m.as_str().to_string();
            self.pos += m.end();
            return Token::new(TokenType::INT, lexeme);
        }
        for (lexeme, typ) in SIMPLE_TOKENS {
            if rest.starts_with(lexeme) {
                self.pos += lexeme.len();
                return Token::new(typ, lexeme);
            }
        }
        let chr = rest.chars().next().expect("rest is non-empty");
        self.pos += chr.len_utf8();
        Token::new(TokenType::ERRORTOKEN, chr.to_string())
    }
}
