use crate::ast::RegexAstNode;
use std::collections::BTreeSet;

pub(crate) type StateId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeLabel {
    Symbol(char),
    Epsilon,
}

#[derive(Debug, Default)]
struct NfaState {
    edges: Vec<(EdgeLabel, StateId)>,
}

/// Thompson-style NFA over an index arena. States are identified by their
/// position in the arena, which also serves as the identity key whenever
/// states are collected into sets. Star/Plus introduce epsilon back-edges,
/// so the graph is cyclic in general and every traversal tracks a visited
/// set.
pub(crate) struct Nfa {
    states: Vec<NfaState>,
    start: StateId,
    accept: StateId,
}

/// Entry/exit pair produced by compiling one AST node. The exit state has
/// no outgoing edges at creation time; only the parent construction that
/// consumes the fragment wires it further.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

impl Nfa {
    pub fn from_ast(node: &RegexAstNode) -> Self {
        let mut nfa = Nfa {
            states: Vec::new(),
            start: 0,
            accept: 0,
        };

        let fragment = nfa.compile(node);
        nfa.start = fragment.start;
        nfa.accept = fragment.end;
        nfa
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn edges(&self, state: StateId) -> &[(EdgeLabel, StateId)] {
        &self.states[state].edges
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Smallest superset of `states` closed under epsilon edges.
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for &(label, target) in self.edges(state) {
                if label == EdgeLabel::Epsilon && closure.insert(target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    fn add_state(&mut self) -> StateId {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn add_edge(&mut self, from: StateId, label: EdgeLabel, to: StateId) {
        self.states[from].edges.push((label, to));
    }

    fn compile(&mut self, node: &RegexAstNode) -> Fragment {
        match node {
            RegexAstNode::Literal(c) => {
                let start = self.add_state();
                let end = self.add_state();
                self.add_edge(start, EdgeLabel::Symbol(*c), end);
                Fragment { start, end }
            }
            RegexAstNode::Concat(left, right) => {
                let left_fragment = self.compile(left);
                let right_fragment = self.compile(right);
                self.add_edge(left_fragment.end, EdgeLabel::Epsilon, right_fragment.start);
                Fragment {
                    start: left_fragment.start,
                    end: right_fragment.end,
                }
            }
            RegexAstNode::Alter(left, right) => {
                let start = self.add_state();
                let end = self.add_state();
                let left_fragment = self.compile(left);
                let right_fragment = self.compile(right);

                self.add_edge(start, EdgeLabel::Epsilon, left_fragment.start);
                self.add_edge(start, EdgeLabel::Epsilon, right_fragment.start);
                self.add_edge(left_fragment.end, EdgeLabel::Epsilon, end);
                self.add_edge(right_fragment.end, EdgeLabel::Epsilon, end);
                Fragment { start, end }
            }
            RegexAstNode::Star(expr) => {
                let inner = self.compile(expr);
                self.kleene_star(inner)
            }
            RegexAstNode::OneOrMore(expr) => {
                // E+ is E followed by a starred second compilation of E.
                // The two copies of E share no states.
                let first = self.compile(expr);
                let second = self.compile(expr);
                let repeated = self.kleene_star(second);

                self.add_edge(first.end, EdgeLabel::Epsilon, repeated.start);
                Fragment {
                    start: first.start,
                    end: repeated.end,
                }
            }
            RegexAstNode::ZeroOrOne(expr) => {
                let start = self.add_state();
                let end = self.add_state();
                let inner = self.compile(expr);

                self.add_edge(start, EdgeLabel::Epsilon, inner.start);
                self.add_edge(start, EdgeLabel::Epsilon, end);
                self.add_edge(inner.end, EdgeLabel::Epsilon, end);
                Fragment { start, end }
            }
        }
    }

    fn kleene_star(&mut self, inner: Fragment) -> Fragment {
        let start = self.add_state();
        let end = self.add_state();

        self.add_edge(start, EdgeLabel::Epsilon, inner.start);
        self.add_edge(start, EdgeLabel::Epsilon, end);

        // the back-edge that makes the graph cyclic
        self.add_edge(inner.end, EdgeLabel::Epsilon, inner.start);
        self.add_edge(inner.end, EdgeLabel::Epsilon, end);

        Fragment { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn nfa(pattern: &str) -> Nfa {
        Nfa::from_ast(&RegexAstNode::new(pattern).unwrap())
    }

    #[test]
    fn literal_fragment_has_a_single_symbol_edge() {
        // given
        let nfa = nfa("a");

        // then
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(nfa.edges(nfa.start()), &[(EdgeLabel::Symbol('a'), nfa.accept())]);
    }

    #[test]
    fn accept_state_has_no_outgoing_edges() {
        // given
        for pattern in ["a", "ab", "a|b", "a*", "a+", "a?", "(ab)+c"] {
            let nfa = nfa(pattern);

            // then
            assert!(nfa.edges(nfa.accept()).is_empty());
        }
    }

    #[rstest]
    #[case("a", 2)] // entry + exit
    #[case("ab", 4)] // two literal fragments
    #[case("a|b", 6)] // two literals + fresh entry/exit
    #[case("a*", 4)] // literal + fresh entry/exit
    #[case("a?", 4)]
    #[case("a+", 6)] // literal compiled twice, plus the star wrapper
    #[case("(ab)+", 10)] // the whole group is compiled twice
    fn state_count_per_construction(#[case] pattern: &str, #[case] expected: usize) {
        // when
        let nfa = nfa(pattern);

        // then
        assert_eq!(nfa.state_count(), expected);
    }

    #[test]
    fn one_or_more_duplicates_the_inner_fragment() {
        // a+ carries two independent copies of the 'a' fragment, so it is
        // exactly one literal fragment larger than a*
        assert_eq!(nfa("a+").state_count(), nfa("a*").state_count() + 2);
    }

    #[test]
    fn star_creates_a_cycle_reaching_back_to_the_inner_entry() {
        // given
        let nfa = nfa("a*");

        // when: follow the symbol edge out of the inner entry, then look
        // at the epsilon edges leaving the inner exit
        let inner_entry = 0;
        let inner_exit = 1;
        let back_edges: Vec<_> = nfa
            .edges(inner_exit)
            .iter()
            .filter(|&&(label, target)| label == EdgeLabel::Epsilon && target == inner_entry)
            .collect();

        // then
        assert_eq!(back_edges.len(), 1);
    }

    #[test]
    fn epsilon_closure_terminates_on_cyclic_graphs() {
        // given
        let nfa = nfa("(a*)*");

        // when
        let closure = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));

        // then: every state except the literal's exit is epsilon-reachable
        assert!(closure.contains(&nfa.start()));
        assert!(closure.contains(&nfa.accept()));
        assert_eq!(closure.len(), nfa.state_count() - 1);
    }

    #[test]
    fn epsilon_closure_does_not_follow_symbol_edges() {
        // given
        let nfa = nfa("ab");

        // when
        let closure = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));

        // then
        assert_eq!(closure, BTreeSet::from([nfa.start()]));
    }
}
