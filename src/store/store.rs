use std::rc::Rc;

use super::{
    node::{NodeId, NodeValue, Variable},
    outcome::{Interrupt, OpResult},
};

/// Atoms the core itself needs: list terminator, virtual-string label,
/// list-cell label. Interned once at store construction.
#[derive(Debug, Clone, Copy)]
pub struct CoreAtoms {
    pub nil: NodeId,
    pub sharp: NodeId,
    pub pipe: NodeId,
}

/// Arena of interpreter nodes.
///
/// Nodes are addressed by [`NodeId`] and never relocated; binding a variable
/// rewrites its slot to a `Ref` forwarding node. The store also carries the
/// wake queue: control variables whose wait was satisfied by a bind, to be
/// drained by the external scheduler.
pub struct Store {
    nodes: Vec<NodeValue>,
    woken: Vec<NodeId>,
    next_name: u64,
    total_allocations: usize,
    total_bindings: usize,
    pub atoms: CoreAtoms,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let mut store = Store {
            nodes: Vec::new(),
            woken: Vec::new(),
            next_name: 0,
            total_allocations: 0,
            total_bindings: 0,
            atoms: CoreAtoms {
                nil: NodeId(0),
                sharp: NodeId(0),
                pipe: NodeId(0),
            },
        };
        store.atoms = CoreAtoms {
            nil: store.atom("nil"),
            sharp: store.atom("#"),
            pipe: store.atom("|"),
        };
        store
    }

    /// Allocates a node and returns its handle.
    pub fn alloc(&mut self, value: NodeValue) -> NodeId {
        self.total_allocations += 1;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(value);
        id
    }

    /// Returns the contents of a node, without following `Ref` forwarding.
    ///
    /// Panics if the handle is out of bounds.
    pub fn value(&self, id: NodeId) -> &NodeValue {
        &self.nodes[id.index()]
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut NodeValue {
        &mut self.nodes[id.index()]
    }

    /// Follows `Ref` forwarding to the representative node.
    ///
    /// Bind only ever turns a `Var` into a `Ref` to an existing node, so
    /// forwarding chains are finite by construction.
    pub fn resolve(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let NodeValue::Ref(next) = self.value(current) {
            current = *next;
        }
        current
    }

    /// Contents of the representative node behind `id`.
    pub fn resolve_value(&self, id: NodeId) -> &NodeValue {
        self.value(self.resolve(id))
    }

    pub fn fresh_var(&mut self) -> NodeId {
        self.alloc(NodeValue::Var(Variable::default()))
    }

    pub fn fresh_name(&mut self) -> NodeId {
        let name = self.next_name;
        self.next_name += 1;
        self.alloc(NodeValue::Name(name))
    }

    pub fn atom(&mut self, text: &str) -> NodeId {
        self.alloc(NodeValue::Atom(Rc::from(text)))
    }

    pub fn int(&mut self, value: i64) -> NodeId {
        self.alloc(NodeValue::Int(value))
    }

    /// True when the slot neither is an unbound variable nor holds a failure
    /// marker: "the field is bound".
    pub fn is_determined(&self, id: NodeId) -> bool {
        !matches!(
            self.resolve_value(id),
            NodeValue::Var(_) | NodeValue::Failed(_)
        )
    }

    /// True when the slot is still an unbound variable.
    pub fn is_unbound(&self, id: NodeId) -> bool {
        matches!(self.resolve_value(id), NodeValue::Var(_))
    }

    /// The exception carried by a failure marker, if the slot holds one.
    pub fn failed_exception(&self, id: NodeId) -> Option<NodeId> {
        match self.resolve_value(id) {
            NodeValue::Failed(exception) => Some(*exception),
            _ => None,
        }
    }

    /// Suspends the current operation on an unbound slot.
    ///
    /// Convenience for the common guard `Var => Err(Suspend)`.
    pub fn wait(&self, id: NodeId) -> Interrupt {
        let var = self.resolve(id);
        debug_assert!(matches!(self.value(var), NodeValue::Var(_)));
        Interrupt::Suspend(var)
    }

    /// Binds an unbound variable to `target` (single assignment).
    ///
    /// The variable's suspension list moves onto the wake queue. Panics if
    /// the node is not an unbound variable: rebinding is a programming
    /// error, not a recoverable failure.
    pub fn bind(&mut self, var: NodeId, target: NodeId) {
        let var = self.resolve(var);
        let slot = self.value_mut(var);
        match slot {
            NodeValue::Var(variable) => {
                let suspensions = std::mem::take(&mut variable.suspensions);
                *slot = NodeValue::Ref(target);
                self.woken.extend(suspensions);
                self.total_bindings += 1;
            }
            other => panic!(
                "Store::bind: node is {}, not an unbound variable",
                other.kind_name()
            ),
        }
    }

    /// Marks an unbound variable as permanently failed with `exception`.
    ///
    /// Waiters are woken exactly as for a normal bind; they observe the
    /// failure marker when they retry.
    pub fn fail(&mut self, var: NodeId, exception: NodeId) {
        let marker = self.alloc(NodeValue::Failed(exception));
        self.bind(var, marker);
    }

    /// Parks `control` on the suspension list of the unbound variable `var`.
    ///
    /// Panics if `var` is already determined; under the single-writer
    /// invariant a slot cannot become bound between the caller's scan and
    /// this registration.
    pub fn add_suspension(&mut self, var: NodeId, control: NodeId) {
        let var = self.resolve(var);
        match self.value_mut(var) {
            NodeValue::Var(variable) => variable.suspensions.push(control),
            other => panic!(
                "Store::add_suspension: node is {}, not an unbound variable",
                other.kind_name()
            ),
        }
    }

    /// Drains the control variables woken since the last drain.
    ///
    /// This is the scheduler's pull interface: each returned variable stands
    /// for at least one computation to reschedule. A satisfied-but-undrained
    /// control variable is simply abandoned with its waiter.
    pub fn drain_woken(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.woken)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn total_allocations(&self) -> usize {
        self.total_allocations
    }

    pub fn total_bindings(&self) -> usize {
        self.total_bindings
    }

    /// Raises `exception` as an interrupt. Helper so call sites read
    /// `return store.raise(exc)` the way binds read `store.bind(..)`.
    pub fn raise<T>(&self, exception: NodeId) -> OpResult<T> {
        Err(Interrupt::Raise(exception))
    }
}
