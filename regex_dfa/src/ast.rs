use crate::token::Token;
use crate::token::TokenSequence;
use std::fmt::{Display, Formatter};

struct AstParser {
    seq: TokenSequence,
}

impl AstParser {
    pub fn parse(seq: TokenSequence) -> Result<RegexAstNode, SyntaxError> {
        let mut parser = Self { seq };

        let parsed_ast = parser.parse_alternation()?;

        if parser.seq.peek() != Token::End {
            return Err(SyntaxError::ExtraInput);
        }
        Ok(parsed_ast)
    }

    fn parse_alternation(&mut self) -> Result<RegexAstNode, SyntaxError> {
        let mut left_node = self.parse_concatenation()?;

        while self.seq.peek() == Token::Pipe {
            self.seq.next();

            let right_node = self.parse_concatenation()?;
            left_node = RegexAstNode::Alter(Box::new(left_node), Box::new(right_node));
        }

        Ok(left_node)
    }

    fn parse_concatenation(&mut self) -> Result<RegexAstNode, SyntaxError> {
        if !self.seq.peek().is_atom_start() {
            return Err(SyntaxError::ExpectedAtom);
        }

        let mut left_node = self.parse_repetition()?;

        while self.seq.peek().is_atom_start() {
            let right_node = self.parse_repetition()?;
            left_node = RegexAstNode::Concat(Box::new(left_node), Box::new(right_node));
        }

        Ok(left_node)
    }

    /// Repetition suffixes fold left, so `a**` parses as `Star(Star(a))`
    /// rather than failing.
    fn parse_repetition(&mut self) -> Result<RegexAstNode, SyntaxError> {
        let mut node = self.parse_atom()?;

        while self.seq.peek().is_quantifier() {
            node = match self.seq.next() {
                Token::Star => RegexAstNode::Star(Box::new(node)),
                Token::Plus => RegexAstNode::OneOrMore(Box::new(node)),
                Token::QuestionMark => RegexAstNode::ZeroOrOne(Box::new(node)),
                token => return Err(SyntaxError::UnexpectedToken(token)),
            };
        }

        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<RegexAstNode, SyntaxError> {
        match self.seq.next() {
            Token::Literal(c) => Ok(RegexAstNode::Literal(c)),
            Token::LParen => {
                let nested_expr = self.parse_alternation()?;
                match self.seq.next() {
                    Token::RParen => Ok(nested_expr),
                    Token::End => Err(SyntaxError::ExpectedClosingParenthesis),
                    token => Err(SyntaxError::UnexpectedToken(token)),
                }
            }
            token => Err(SyntaxError::UnexpectedToken(token)),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum RegexAstNode {
    Literal(char),
    ZeroOrOne(Box<RegexAstNode>),
    OneOrMore(Box<RegexAstNode>),
    Star(Box<RegexAstNode>),
    Alter(Box<RegexAstNode>, Box<RegexAstNode>),
    Concat(Box<RegexAstNode>, Box<RegexAstNode>),
}

impl RegexAstNode {
    pub(crate) fn new(pattern: &str) -> Result<Self, SyntaxError> {
        AstParser::parse(TokenSequence::from(pattern))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyntaxError {
    UnexpectedToken(Token),
    ExpectedClosingParenthesis,
    ExpectedAtom,
    ExtraInput,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::UnexpectedToken(token) => write!(f, "unexpected token '{}'", token),
            SyntaxError::ExpectedClosingParenthesis => {
                write!(f, "expected ')' before end of pattern")
            }
            SyntaxError::ExpectedAtom => write!(f, "expected atom"),
            SyntaxError::ExtraInput => write!(f, "extra input"),
        }
    }
}
