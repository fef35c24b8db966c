use ast::RegexAstNode;
use nfa::Nfa;

mod ast;
mod dfa;
mod nfa;
mod token;

pub use ast::SyntaxError;
pub use dfa::Dfa;
pub use token::Token;

/// A restricted regular expression (literals, `|`, grouping, `*`, `+`,
/// `?`) compiled down to a DFA, so matching runs in time linear in the
/// input length.
pub struct Regex {
    dfa: Dfa,
}

impl Regex {
    /// Runs the whole pipeline: tokenize, parse, Thompson construction,
    /// subset construction. The intermediate token sequence, AST and NFA
    /// are dropped here; only the DFA survives.
    pub fn new(pattern: &str) -> Result<Self, SyntaxError> {
        let nfa = Nfa::from_ast(&RegexAstNode::new(pattern)?);

        Ok(Self {
            dfa: Dfa::from_nfa(&nfa),
        })
    }

    /// True iff the whole input is matched by the pattern. Never fails
    /// and never mutates the compiled automaton.
    pub fn is_exact_match(&self, s: &str) -> bool {
        self.dfa.is_exact_match(s)
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}
