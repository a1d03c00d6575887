use super::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use super::error::Error;
use super::tokenizer::{Lexer, Token, TokenType as TT};

/// Binding powers, weakest first. The derived ordering is what the Pratt
/// loop compares against.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(typ: TT) -> Precedence {
    match typ {
        TT::EQEQUAL | TT::NOTEQUAL => Precedence::Equals,
        TT::LESS | TT::LESSEQUAL | TT::GREATER | TT::GREATEREQUAL => Precedence::LessGreater,
        TT::PLUS | TT::MINUS => Precedence::Sum,
        TT::STAR | TT::SLASH => Precedence::Product,
        TT::LPAR => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Recursive-descent statement parser with Pratt expression parsing on top
/// of a two-token window over the lexer.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<Error>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Self {
            lexer,
            current: Token::default(),
            peek: Token::default(),
            errors: vec![],
        };
        parser.advance();
        parser.advance();
        parser
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];
        while self.current.typ != TT::ENDMARKER {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }
        Program { statements }
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn expect_peek(&mut self, expected: TT) -> bool {
        if self.peek.typ == expected {
            self.advance();
            true
        } else {
            self.errors.push(Error::UnexpectedToken {
                expected,
                got: self.peek.typ,
            });
            false
        }
    }

    // Statements leave `current` on their last consumed token; the caller
    // advances past it.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.typ {
            TT::LET => self.parse_let_statement(),
            TT::RETURN => self.parse_return_statement(),
            TT::WHILE => self.parse_while_statement(),
            TT::FOR => self.parse_for_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        if !self.expect_peek(TT::IDENT) {
            return None;
        }
        let name = Identifier::new(self.current.clone());
        if !self.expect_peek(TT::EQUAL) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek.typ == TT::SEMI {
            self.advance();
        }
        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek.typ == TT::SEMI {
            self.advance();
        }
        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest);
        if self.peek.typ == TT::SEMI {
            self.advance();
        }
        Some(Statement::Expression { token, expression })
    }

    fn parse_while_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        if !self.expect_peek(TT::LPAR) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TT::RPAR) {
            return None;
        }
        if !self.expect_peek(TT::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::While {
            token,
            condition,
            body,
        })
    }

    // for (INIT; COND; STEP) { BODY } — any of the three clauses may be
    // empty. The statement clauses consume a trailing ';' themselves, so the
    // separator check has to tolerate already standing on one.
    fn parse_for_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        if !self.expect_peek(TT::LPAR) {
            return None;
        }
        self.advance();
        let init = if self.current.typ == TT::SEMI {
            None
        } else {
            self.parse_statement().map(Box::new)
        };
        if self.current.typ != TT::SEMI && !self.expect_peek(TT::SEMI) {
            return None;
        }
        self.advance();
        let condition = if self.current.typ == TT::SEMI {
            // an empty condition means "loop forever"
            Some(Expression::BooleanLiteral {
                token: Token::new(TT::TRUE, "true"),
                value: true,
            })
        } else {
            self.parse_expression(Precedence::Lowest)
        };
        if self.current.typ != TT::SEMI && !self.expect_peek(TT::SEMI) {
            return None;
        }
        self.advance();
        let increment = if self.current.typ == TT::RPAR {
            None
        } else {
            self.parse_statement().map(Box::new)
        };
        if self.current.typ != TT::RPAR && !self.expect_peek(TT::RPAR) {
            return None;
        }
        if !self.expect_peek(TT::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Statement::For {
            token,
            init,
            condition,
            increment,
            body,
        })
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = vec![];
        self.advance();
        while self.current.typ != TT::RBRACE && self.current.typ != TT::ENDMARKER {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }
        BlockStatement { token, statements }
    }

    /// The Pratt loop: fold infix operators into `left` for as long as the
    /// lookahead binds tighter than the power we were called with.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;
        while self.peek.typ != TT::SEMI && precedence < precedence_of(self.peek.typ) {
            left = match self.peek.typ {
                TT::PLUS
                | TT::MINUS
                | TT::STAR
                | TT::SLASH
                | TT::EQEQUAL
                | TT::NOTEQUAL
                | TT::LESS
                | TT::LESSEQUAL
                | TT::GREATER
                | TT::GREATEREQUAL => {
                    self.advance();
                    self.parse_infix_expression(left)
                }
                TT::LPAR => {
                    self.advance();
                    self.parse_call_expression(left)?
                }
                _ => return Some(left),
            };
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.typ {
            TT::IDENT => Some(Expression::Identifier(Identifier::new(self.current.clone()))),
            TT::INT => self.parse_integer_literal(),
            TT::TRUE | TT::FALSE => Some(Expression::BooleanLiteral {
                token: self.current.clone(),
                value: self.current.typ == TT::TRUE,
            }),
            TT::EXCLAMATION | TT::MINUS => self.parse_prefix_expression(),
            TT::LPAR => self.parse_grouped_expression(),
            TT::IF => self.parse_if_expression(),
            TT::FUNCTION => self.parse_function_literal(),
            typ => {
                self.errors.push(Error::NoPrefixRule(typ));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.lexeme.parse::<i32>() {
            Ok(value) => Some(Expression::IntegerLiteral { token, value }),
            Err(_) => {
                self.errors.push(Error::MalformedInteger(token.lexeme));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.lexeme.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix).map(Box::new);
        Some(Expression::Prefix {
            token,
            operator,
            right,
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Expression {
        let token = self.current.clone();
        let operator = token.lexeme.clone();
        let precedence = precedence_of(token.typ);
        self.advance();
        let right = self.parse_expression(precedence).map(Box::new);
        Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right,
        }
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TT::RPAR) {
            return None;
        }
        expression
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        if !self.expect_peek(TT::LPAR) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest).map(Box::new);
        if !self.expect_peek(TT::RPAR) {
            return None;
        }
        if !self.expect_peek(TT::LBRACE) {
            return None;
        }
        let consequence = self.parse_block_statement();
        let mut alternative = None;
        if self.peek.typ == TT::ELSE {
            self.advance();
            if !self.expect_peek(TT::LBRACE) {
                return None;
            }
            alternative = Some(self.parse_block_statement());
        }
        Some(Expression::If {
            token,
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        if !self.expect_peek(TT::LPAR) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TT::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Expression::FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = vec![];
        if self.peek.typ == TT::RPAR {
            self.advance();
            return Some(parameters);
        }
        self.advance();
        parameters.push(Identifier::new(self.current.clone()));
        while self.peek.typ == TT::COMMA {
            self.advance();
            self.advance();
            parameters.push(Identifier::new(self.current.clone()));
        }
        if !self.expect_peek(TT::RPAR) {
            return None;
        }
        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = vec![];
        if self.peek.typ == TT::RPAR {
            self.advance();
            return Some(arguments);
        }
        self.advance();
        if let Some(argument) = self.parse_expression(Precedence::Lowest) {
            arguments.push(argument);
        }
        while self.peek.typ == TT::COMMA {
            self.advance();
            self.advance();
            if let Some(argument) = self.parse_expression(Precedence::Lowest) {
                arguments.push(argument);
            }
        }
        if !self.expect_peek(TT::RPAR) {
            return None;
        }
        Some(arguments)
    }
}
