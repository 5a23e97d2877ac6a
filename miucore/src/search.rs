//! Bounded breadth-first exploration of the rewrite graph rooted at the axiom.
//!
//! The search is the ground-truth meaning of "derivable" for small strings: a string is found
//! only if an actual chain of rule applications reaches it. The graph is infinite (rule 2 doubles
//! lengths), so exploration is bounded by [`SearchLimits`]:
//! * `max_steps`: nodes at this depth are not expanded;
//! * `max_length`: successors longer than this are discarded;
//! * `max_states` (optional): exploration stops once this many strings were visited.
//!
//! Hitting a ceiling before reaching the goal yields [`MiuError::SearchBoundExceeded`], which is
//! never a proof of non-derivability.
//!
//! Found derivations are shortest ones, since the graph is explored in breadth-first order.
//!
//! ```
//! use miucore::search::{SearchLimits, Searcher};
//! use miucore::symbol::parse;
//!
//! let searcher = Searcher::new(SearchLimits::default());
//! let certificate = searcher.search(&parse("MUI").unwrap()).unwrap();
//! assert_eq!(certificate.len(), 3);
//! assert!(searcher.search(&parse("MU").unwrap()).is_err());
//! ```
use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use petgraph::{
    dot::Dot,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::{
    derivation::{Derivation, DerivationStep},
    magic::{DEFAULT_MAX_LENGTH, DEFAULT_MAX_STEPS},
    rules::{Application, successors},
    symbol::MString,
    utils::error::{MiuError, MiuResult},
};

/// Ceilings bounding a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchLimits {
    /// Maximum number of rule applications from the axiom.
    pub max_steps: usize,
    /// Maximum length of any explored string.
    pub max_length: usize,
    /// Maximum number of visited strings, unbounded if `None`.
    pub max_states: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_length: DEFAULT_MAX_LENGTH,
            max_states: None,
        }
    }
}

impl SearchLimits {
    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Self { max_steps, ..self }
    }

    pub fn with_max_length(self, max_length: usize) -> Self {
        Self { max_length, ..self }
    }

    pub fn with_max_states(self, max_states: Option<usize>) -> Self {
        Self { max_states, ..self }
    }
}

/// Counters describing one exploration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of distinct strings visited (axiom included).
    pub explored: usize,
    /// Largest depth of a visited string.
    pub depth: usize,
    /// Number of successors discarded for exceeding `max_length`.
    pub pruned_by_length: usize,
    /// Whether some string at depth `max_steps` was left unexpanded.
    pub step_ceiling_hit: bool,
    /// Whether exploration stopped on `max_states`.
    pub state_ceiling_hit: bool,
}

/// The explored part of the rewrite graph.
///
/// Nodes are visited strings, edges are rule applications between visited strings. Each node
/// except the axiom also records the edge through which breadth-first search first reached it,
/// which yields a shortest derivation.
#[derive(Debug, Clone)]
pub struct RewriteGraph {
    graph: DiGraph<MString, Application>,
    index: HashMap<MString, NodeIndex>,
    parents: Vec<Option<EdgeIndex>>,
    depths: Vec<usize>,
    stats: SearchStats,
}

impl RewriteGraph {
    fn rooted_at_axiom() -> (Self, NodeIndex) {
        let mut this = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            parents: Vec::new(),
            depths: Vec::new(),
            stats: SearchStats::default(),
        };
        let root = this.insert(MString::axiom(), None, 0);
        (this, root)
    }

    fn insert(&mut self, s: MString, parent: Option<EdgeIndex>, depth: usize) -> NodeIndex {
        let node = self.graph.add_node(s.clone());
        self.index.insert(s, node);
        self.parents.push(parent);
        self.depths.push(depth);
        self.stats.explored += 1;
        self.stats.depth = self.stats.depth.max(depth);
        node
    }

    /// Number of visited strings.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Always `false`: the axiom is visited by every exploration.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Underlying graph, for callers running their own graph algorithms.
    pub fn graph(&self) -> &DiGraph<MString, Application> {
        &self.graph
    }

    pub fn contains(&self, s: &MString) -> bool {
        self.index.contains_key(s)
    }

    /// Minimal number of rule applications reaching `s`, if it was visited.
    pub fn depth_of(&self, s: &MString) -> Option<usize> {
        self.index.get(s).map(|node| self.depths[node.index()])
    }

    /// Visited strings, in breadth-first order.
    pub fn strings(&self) -> impl Iterator<Item = &MString> {
        self.graph.node_weights()
    }

    /// Every explored rule application, as a derivation step.
    pub fn steps(&self) -> impl Iterator<Item = DerivationStep> + '_ {
        self.graph.edge_references().map(|edge| DerivationStep {
            source: self.graph[edge.source()].clone(),
            target: self.graph[edge.target()].clone(),
            application: *edge.weight(),
        })
    }

    /// A shortest derivation of `s`, if it was visited.
    pub fn derivation_of(&self, s: &MString) -> Option<Derivation> {
        self.index.get(s).map(|&node| self.derivation_at(node))
    }

    fn derivation_at(&self, node: NodeIndex) -> Derivation {
        let mut steps = Vec::with_capacity(self.depths[node.index()]);
        let mut current = node;
        while let Some(edge) = self.parents[current.index()] {
            let Some((source, target)) = self.graph.edge_endpoints(edge) else {
                break;
            };
            steps.push(DerivationStep {
                source: self.graph[source].clone(),
                target: self.graph[target].clone(),
                application: self.graph[edge],
            });
            current = source;
        }
        steps.reverse();
        Derivation::from_steps(steps)
    }

    /// Render the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}

/// Breadth-first search over the rewrite graph, bounded by [`SearchLimits`].
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    limits: SearchLimits,
}

impl Searcher {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Find a shortest derivation of `goal` within the limits.
    pub fn search(&self, goal: &MString) -> MiuResult<Derivation> {
        debug!("Searching a derivation of `{goal}` with {:?}", self.limits);

        if goal.len() > self.limits.max_length {
            debug!(
                "`{goal}` is longer than the length ceiling ({}), nothing to explore",
                self.limits.max_length
            );
            return Err(MiuError::SearchBoundExceeded {
                goal: goal.clone(),
                explored: 0,
                depth: 0,
            });
        }

        let (graph, found) = self.run(Some(goal));
        match found {
            Some(node) => {
                let derivation = graph.derivation_at(node);
                debug!(
                    "Found `{goal}` at depth {} after visiting {} strings",
                    derivation.len(),
                    graph.len()
                );
                Ok(derivation)
            }
            None => Err(MiuError::SearchBoundExceeded {
                goal: goal.clone(),
                explored: graph.stats.explored,
                depth: graph.stats.depth,
            }),
        }
    }

    /// Explore the whole bounded graph.
    pub fn explore(&self) -> RewriteGraph {
        self.run(None).0
    }

    fn run(&self, goal: Option<&MString>) -> (RewriteGraph, Option<NodeIndex>) {
        let limits = &self.limits;
        let (mut graph, root) = RewriteGraph::rooted_at_axiom();
        if goal == Some(&graph.graph[root]) {
            return (graph, Some(root));
        }

        let mut frontier = VecDeque::from([root]);
        let mut layer = 0;
        'search: while let Some(node) = frontier.pop_front() {
            let depth = graph.depths[node.index()];
            if depth != layer {
                trace!("Depth {depth}: {} strings in frontier", frontier.len() + 1);
                layer = depth;
            }
            if depth >= limits.max_steps {
                graph.stats.step_ceiling_hit = true;
                continue;
            }

            let source = graph.graph[node].clone();
            for (application, target) in successors(&source) {
                if target.len() > limits.max_length {
                    graph.stats.pruned_by_length += 1;
                    continue;
                }

                if let Some(&existing) = graph.index.get(&target) {
                    graph.graph.add_edge(node, existing, application);
                    continue;
                }

                if limits.max_states.is_some_and(|max| graph.len() >= max) {
                    graph.stats.state_ceiling_hit = true;
                    break 'search;
                }

                let is_goal = goal == Some(&target);
                let child = graph.insert(target, None, depth + 1);
                let edge = graph.graph.add_edge(node, child, application);
                graph.parents[child.index()] = Some(edge);

                if is_goal {
                    return (graph, Some(child));
                }
                frontier.push_back(child);
            }
        }

        debug!("Exploration ended: {:?}", graph.stats);
        (graph, None)
    }
}

/// Search a derivation of `goal` using at most `step_bound` rule applications.
///
/// The length ceiling is the default one, raised to the length of `goal` if needed. `None` only
/// means that no derivation exists within those bounds.
pub fn find_derivation(goal: &MString, step_bound: usize) -> Option<Derivation> {
    let limits = SearchLimits::default().with_max_steps(step_bound);
    let limits = limits.with_max_length(limits.max_length.max(goal.len()));
    Searcher::new(limits).search(goal).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::parse;

    #[test]
    fn axiom_needs_no_step() {
        let derivation = find_derivation(&MString::axiom(), 0).unwrap();
        assert!(derivation.is_empty());
    }

    #[test]
    fn shortest_derivations() {
        let derivation = find_derivation(&parse("MIU").unwrap(), 5).unwrap();
        assert_eq!(derivation.len(), 1);

        let derivation = find_derivation(&parse("MUI").unwrap(), 5).unwrap();
        assert_eq!(derivation.len(), 3);
        assert!(derivation.proves(&parse("MUI").unwrap()));

        let derivation = find_derivation(&parse("MIIII").unwrap(), 5).unwrap();
        assert_eq!(derivation.len(), 2);
    }

    #[test]
    fn step_bound_is_respected() {
        assert!(find_derivation(&parse("MUI").unwrap(), 2).is_none());
        assert!(find_derivation(&parse("MUI").unwrap(), 3).is_some());
    }

    #[test]
    fn mu_is_never_found() {
        let searcher = Searcher::new(SearchLimits::default().with_max_length(10));
        match searcher.search(&parse("MU").unwrap()) {
            Err(MiuError::SearchBoundExceeded { explored, .. }) => assert!(explored > 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn goal_longer_than_ceiling() {
        let searcher = Searcher::new(SearchLimits::default().with_max_length(4));
        assert!(matches!(
            searcher.search(&parse("MIIIII").unwrap()),
            Err(MiuError::SearchBoundExceeded { explored: 0, .. })
        ));
    }

    #[test]
    fn state_ceiling_stops_exploration() {
        let limits = SearchLimits::default().with_max_states(Some(5));
        let graph = Searcher::new(limits).explore();
        assert_eq!(graph.len(), 5);
        assert!(graph.stats().state_ceiling_hit);
    }

    #[test]
    fn explore_small_graph() {
        // MI -> {MIU, MII}; MIU -> MIUIU; MII -> {MIIU, MIIII}
        let limits = SearchLimits::default().with_max_steps(2).with_max_length(8);
        let graph = Searcher::new(limits).explore();
        let mut strings: Vec<String> = graph.strings().map(|s| s.to_string()).collect();
        strings.sort();
        assert_eq!(strings, ["MI", "MII", "MIIII", "MIIU", "MIU", "MIUIU"]);
        assert_eq!(graph.depth_of(&parse("MIIII").unwrap()), Some(2));
        assert_eq!(graph.depth_of(&parse("MU").unwrap()), None);
        assert!(graph.stats().step_ceiling_hit);
        assert_eq!(graph.steps().count(), 5);

        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("MIUIU"));
    }
}
