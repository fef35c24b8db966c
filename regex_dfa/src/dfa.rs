use crate::nfa::{EdgeLabel, Nfa, StateId};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
struct DfaState {
    edges: Vec<(char, usize)>,
}

/// Deterministic automaton produced by subset construction. At most one
/// edge per symbol leaves any state and there are no epsilon edges, so
/// matching is a single forward walk. The automaton holds no reference
/// back into the NFA it was built from and never changes afterwards,
/// which makes it safe to share between threads.
#[derive(Debug)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: usize,
    accepting: HashSet<usize>,
}

impl Dfa {
    /// Worklist powerset construction. Every DFA state corresponds to an
    /// epsilon-closed set of NFA states; deduplication is keyed by set
    /// equality over the NFA state indices.
    pub(crate) fn from_nfa(nfa: &Nfa) -> Self {
        let alphabet = Self::discover_alphabet(nfa);

        let mut dfa = Dfa {
            states: Vec::new(),
            start: 0,
            accepting: HashSet::new(),
        };
        let mut closure_to_state: HashMap<BTreeSet<StateId>, usize> = HashMap::new();
        let mut unprocessed = VecDeque::new();

        let start_closure = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));
        dfa.start = dfa.add_state();
        closure_to_state.insert(start_closure.clone(), dfa.start);
        unprocessed.push_back((start_closure, dfa.start));

        while let Some((closure, current)) = unprocessed.pop_front() {
            for &symbol in &alphabet {
                let mut moved = BTreeSet::new();
                for &nfa_state in &closure {
                    for &(label, target) in nfa.edges(nfa_state) {
                        if label == EdgeLabel::Symbol(symbol) {
                            moved.insert(target);
                        }
                    }
                }

                // no NFA state consumes this symbol here, so the DFA
                // state simply has no edge for it
                if moved.is_empty() {
                    continue;
                }

                let next_closure = nfa.epsilon_closure(&moved);
                let next = match closure_to_state.get(&next_closure) {
                    Some(&existing) => existing,
                    None => {
                        let created = dfa.add_state();
                        closure_to_state.insert(next_closure.clone(), created);
                        unprocessed.push_back((next_closure, created));
                        created
                    }
                };
                dfa.states[current].edges.push((symbol, next));
            }
        }

        for (closure, &state) in &closure_to_state {
            if closure.contains(&nfa.accept()) {
                dfa.accepting.insert(state);
            }
        }

        dfa
    }

    /// Whole-string matching: consume the input one symbol at a time and
    /// accept iff the walk ends on an accepting state. A missing edge
    /// rejects immediately.
    pub fn is_exact_match(&self, s: &str) -> bool {
        let mut current = self.start;

        for c in s.chars() {
            let next = self.states[current]
                .edges
                .iter()
                .find(|&&(symbol, _)| symbol == c)
                .map(|&(_, target)| target);

            match next {
                Some(target) => current = target,
                None => return false,
            }
        }

        self.accepting.contains(&current)
    }

    /// Every distinct symbol labelling any edge reachable from the NFA
    /// start state. Traversal is by identity with a visited set, since
    /// repetition operators make the graph cyclic.
    fn discover_alphabet(nfa: &Nfa) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        let mut visited: HashSet<StateId> = HashSet::new();
        let mut stack = vec![nfa.start()];

        while let Some(state) = stack.pop() {
            if !visited.insert(state) {
                continue;
            }
            for &(label, target) in nfa.edges(state) {
                if let EdgeLabel::Symbol(c) = label {
                    alphabet.insert(c);
                }
                if !visited.contains(&target) {
                    stack.push(target);
                }
            }
        }

        alphabet
    }

    fn add_state(&mut self) -> usize {
        self.states.push(DfaState::default());
        self.states.len() - 1
    }
}
