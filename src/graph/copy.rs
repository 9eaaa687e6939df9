use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::{
    records::{Arity, Chunk, Cons, Record, Tuple},
    store::{NodeId, NodeValue, Store, Variable},
};

/// Counters for one copy pass, collection or cloning.
///
/// Serialized to JSON for external inspection; labels are stable.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CopyStats {
    pub nodes_copied: usize,
    pub memo_hits: usize,
    pub aggregates: usize,
    pub leaves: usize,
    pub variables: usize,
    pub arities_copied: usize,
    pub spaces_copied: usize,
    pub spaces_shared: usize,
}

impl CopyStats {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("CopyStats serializes")
    }
}

// Both passes use the same shell-then-fill scheme: mapping a node allocates
// its target shell, records the memo entry, and queues the node; popping it
// fills the shell's child slots through the memo. Shared substructure and
// back-edges therefore materialize exactly once, with no recursion.

/// Garbage-collection traversal: relocates the graphs reachable from
/// `roots` into a fresh store, preserving sharing, cycles, bindings and
/// suspension lists. Returns the new store, the relocated roots in order,
/// and the pass counters.
pub fn collect(source: &Store, roots: &[NodeId]) -> (Store, Vec<NodeId>, CopyStats) {
    let mut collector = Collector {
        source,
        target: Store::new(),
        memo: HashMap::new(),
        arity_memo: HashMap::new(),
        pending: Vec::new(),
        stats: CopyStats::default(),
    };
    let relocated = roots.iter().map(|&root| collector.map(root)).collect();
    collector.run();
    (collector.target, relocated, collector.stats)
}

struct Collector<'s> {
    source: &'s Store,
    target: Store,
    memo: HashMap<NodeId, NodeId>,
    arity_memo: HashMap<*const Arity, Rc<Arity>>,
    pending: Vec<NodeId>,
    stats: CopyStats,
}

impl Collector<'_> {
    fn map(&mut self, node: NodeId) -> NodeId {
        let node = self.source.resolve(node);
        if let Some(&copied) = self.memo.get(&node) {
            self.stats.memo_hits += 1;
            return copied;
        }

        let copied = match self.source.value(node) {
            NodeValue::Int(value) => {
                self.stats.leaves += 1;
                self.target.alloc(NodeValue::Int(*value))
            }
            NodeValue::Atom(text) => {
                self.stats.leaves += 1;
                self.target.alloc(NodeValue::Atom(text.clone()))
            }
            NodeValue::Name(name) => {
                self.stats.leaves += 1;
                self.target.alloc(NodeValue::Name(*name))
            }
            // Collection always copies the handle; the space itself lives
            // outside the store and is shared, not relocated.
            NodeValue::Space(space) => {
                self.stats.spaces_copied += 1;
                let space = space.clone();
                self.target.alloc(NodeValue::Space(space))
            }
            _ => {
                let shell = self.target.alloc(NodeValue::Var(Variable::default()));
                self.pending.push(node);
                shell
            }
        };
        self.stats.nodes_copied += 1;
        self.memo.insert(node, copied);
        copied
    }

    fn run(&mut self) {
        while let Some(node) = self.pending.pop() {
            let copied = self.memo[&node];
            let value = match self.source.value(node) {
                NodeValue::Var(variable) => {
                    self.stats.variables += 1;
                    let suspensions = variable
                        .suspensions
                        .iter()
                        .map(|&control| self.map(control))
                        .collect();
                    NodeValue::Var(Variable { suspensions })
                }
                NodeValue::Failed(exception) => NodeValue::Failed(self.map(*exception)),
                NodeValue::Tuple(tuple) => {
                    self.stats.aggregates += 1;
                    let label = self.map(tuple.label());
                    let elements = tuple.elements().iter().map(|&e| self.map(e)).collect();
                    NodeValue::Tuple(Tuple::from_parts(label, elements))
                }
                NodeValue::Record(record) => {
                    self.stats.aggregates += 1;
                    let arity = self.copy_arity(record.arity());
                    let elements = record.elements().iter().map(|&e| self.map(e)).collect();
                    NodeValue::Record(Record::from_parts(arity, elements))
                }
                NodeValue::Cons(cons) => {
                    self.stats.aggregates += 1;
                    let head = self.map(cons.head());
                    let tail = self.map(cons.tail());
                    NodeValue::Cons(Cons::from_parts([head, tail]))
                }
                NodeValue::Chunk(chunk) => {
                    let underlying = self.map(chunk.underlying());
                    NodeValue::Chunk(Chunk::new(underlying))
                }
                NodeValue::ArityTable(arity) => {
                    NodeValue::ArityTable(self.copy_arity(arity))
                }
                NodeValue::Ref(_)
                | NodeValue::Int(_)
                | NodeValue::Atom(_)
                | NodeValue::Name(_)
                | NodeValue::Space(_) => unreachable!("copied at allocation"),
            };
            *self.target.value_mut(copied) = value;
        }
    }

    /// Arity tables are shared by many records; the memo keys on the table
    /// pointer so each distinct table relocates once.
    fn copy_arity(&mut self, arity: &Rc<Arity>) -> Rc<Arity> {
        let key = Rc::as_ptr(arity);
        if let Some(copied) = self.arity_memo.get(&key) {
            return copied.clone();
        }
        self.stats.arities_copied += 1;
        let label = self.map(arity.label());
        let features = arity.features().iter().map(|&f| self.map(f)).collect();
        let copied = Rc::new(Arity::from_parts(label, features));
        self.arity_memo.insert(key, copied.clone());
        copied
    }
}

/// Space-cloning traversal: copies the graph reachable from `root` within
/// the same store, preserving sharing and cycles.
///
/// Identical to collection for every record variant. The differences are
/// the policy seams of a same-store copy: ground leaves are shared rather
/// than duplicated, a transient slot clones to a fresh unbound variable
/// (scheduler-level waiters stay with the original), and a space handle is
/// cloned only when its engine agrees — otherwise the clone shares the
/// handle node by reference identity.
pub fn clone_subgraph(store: &mut Store, root: NodeId) -> (NodeId, CopyStats) {
    let mut cloner = Cloner {
        store,
        memo: HashMap::new(),
        pending: Vec::new(),
        stats: CopyStats::default(),
    };
    let cloned = cloner.map(root);
    cloner.run();
    (cloned, cloner.stats)
}

struct Cloner<'s> {
    store: &'s mut Store,
    memo: HashMap<NodeId, NodeId>,
    pending: Vec<NodeId>,
    stats: CopyStats,
}

impl Cloner<'_> {
    fn map(&mut self, node: NodeId) -> NodeId {
        let node = self.store.resolve(node);
        if let Some(&mapped) = self.memo.get(&node) {
            self.stats.memo_hits += 1;
            return mapped;
        }

        let mapped = match self.store.value(node) {
            // Ground values are immutable; the clone shares them. Arity
            // tables count: their label and features are atomic.
            NodeValue::Int(_)
            | NodeValue::Atom(_)
            | NodeValue::Name(_)
            | NodeValue::ArityTable(_) => {
                self.stats.leaves += 1;
                node
            }
            NodeValue::Space(space) => {
                let space = space.clone();
                if space.is_alive() && space.home().borrow().should_be_cloned() {
                    self.stats.spaces_copied += 1;
                    let cloned = space.clone_home();
                    self.store.alloc(NodeValue::Space(cloned))
                } else {
                    self.stats.spaces_shared += 1;
                    node
                }
            }
            _ => {
                let shell = self.store.alloc(NodeValue::Var(Variable::default()));
                self.pending.push(node);
                shell
            }
        };
        if mapped != node {
            self.stats.nodes_copied += 1;
        }
        self.memo.insert(node, mapped);
        mapped
    }

    fn run(&mut self) {
        while let Some(node) = self.pending.pop() {
            let mapped = self.memo[&node];
            let value = self.store.value(node).clone();
            let filled = match value {
                NodeValue::Var(_) => {
                    self.stats.variables += 1;
                    NodeValue::Var(Variable::default())
                }
                NodeValue::Failed(exception) => NodeValue::Failed(self.map(exception)),
                NodeValue::Tuple(tuple) => {
                    self.stats.aggregates += 1;
                    let label = self.map(tuple.label());
                    let elements = tuple.elements().iter().map(|&e| self.map(e)).collect();
                    NodeValue::Tuple(Tuple::from_parts(label, elements))
                }
                NodeValue::Record(record) => {
                    self.stats.aggregates += 1;
                    // The arity is ground (label plus atomic features), so
                    // the clone shares the table.
                    let arity = record.arity().clone();
                    let elements = record.elements().iter().map(|&e| self.map(e)).collect();
                    NodeValue::Record(Record::from_parts(arity, elements))
                }
                NodeValue::Cons(cons) => {
                    self.stats.aggregates += 1;
                    let head = self.map(cons.head());
                    let tail = self.map(cons.tail());
                    NodeValue::Cons(Cons::from_parts([head, tail]))
                }
                NodeValue::Chunk(chunk) => {
                    let underlying = self.map(chunk.underlying());
                    NodeValue::Chunk(Chunk::new(underlying))
                }
                NodeValue::Ref(_)
                | NodeValue::Int(_)
                | NodeValue::Atom(_)
                | NodeValue::Name(_)
                | NodeValue::ArityTable(_)
                | NodeValue::Space(_) => unreachable!("mapped at allocation"),
            };
            *self.store.value_mut(mapped) = filled;
        }
    }
}
