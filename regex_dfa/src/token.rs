use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Literal(char),
    Star,
    Plus,
    QuestionMark,
    Pipe,
    LParen,
    RParen,
    End,
}

impl Token {
    pub fn is_quantifier(&self) -> bool {
        matches!(self, Token::Star | Token::Plus | Token::QuestionMark)
    }

    pub fn is_atom_start(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::LParen)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TokenSequence {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenSequence {
    /// The `End` sentinel is never consumed, so the cursor always points
    /// at a valid token.
    pub fn peek(&self) -> Token {
        self.tokens[self.pos]
    }

    pub fn next(&mut self) -> Token {
        let token = self.tokens[self.pos];
        if token != Token::End {
            self.pos += 1;
        }
        token
    }
}

impl From<&str> for TokenSequence {
    /// Tokenization never fails: characters that are neither operators
    /// nor alphanumeric produce no token at all.
    fn from(pattern: &str) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len() + 1);

        for c in pattern.chars() {
            match c {
                '*' => tokens.push(Token::Star),
                '+' => tokens.push(Token::Plus),
                '?' => tokens.push(Token::QuestionMark),
                '|' => tokens.push(Token::Pipe),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                c if c.is_alphanumeric() => tokens.push(Token::Literal(c)),
                _ => {}
            }
        }
        tokens.push(Token::End);

        TokenSequence { tokens, pos: 0 }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{}", c),
            Token::Star => write!(f, "*"),
            Token::Plus => write!(f, "+"),
            Token::QuestionMark => write!(f, "?"),
            Token::Pipe => write!(f, "|"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::End => write!(f, "END"),
        }
    }
}
