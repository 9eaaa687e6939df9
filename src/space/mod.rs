//! Reified computation spaces: the interpreter-visible handle onto an
//! external search-tree engine.
//!
//! The handle owns only an engine reference, never solver state. While
//! alive it mediates `ask`/`merge`/`commit`/`clone`; [`kill`] irreversibly
//! invalidates the reference, after which every operation raises a
//! `deadSpace` error instead of touching the engine. Handle operations are
//! not reentrant; the surrounding VM serializes all calls.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{
    exceptions::{raise, raise_type_error},
    records::tuple::Tuple,
    store::{NodeId, NodeValue, OpResult, Store},
};

/// Solver status reported by [`SpaceEngine::ask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceStatus {
    Failed,
    Merged,
    Succeeded { entailed: bool },
    Alternatives(usize),
}

/// The narrow seam toward the external space engine. The solver lives
/// outside this crate; the handle only mediates requests and wraps
/// results.
pub trait SpaceEngine {
    fn is_alive(&self) -> bool;
    /// Policy decision owned by the engine: whether a space-cloning pass
    /// should deep-clone handles onto this space.
    fn should_be_cloned(&self) -> bool;
    /// Current solver status, without mutating the space.
    fn ask(&self) -> SpaceStatus;
    /// Absorbs the space's outcome into the enclosing computation,
    /// producing its root value.
    fn merge(&mut self, store: &mut Store) -> OpResult<NodeId>;
    /// Commits one alternative inside the space.
    fn commit(&mut self, store: &mut Store, decision: NodeId) -> OpResult<()>;
    /// Deep-copies the solver state, returning an independently
    /// continuable space.
    fn clone_space(&self) -> SpaceRef;
    fn kill(&mut self);
}

pub type SpaceRef = Rc<RefCell<dyn SpaceEngine>>;

/// Value-level handle onto a space. `home` present ⇔ alive.
#[derive(Clone)]
pub struct ReifiedSpace {
    home: Option<SpaceRef>,
}

impl fmt::Debug for ReifiedSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_alive() {
            write!(f, "ReifiedSpace(alive)")
        } else {
            write!(f, "ReifiedSpace(killed)")
        }
    }
}

impl ReifiedSpace {
    pub fn new(home: SpaceRef) -> ReifiedSpace {
        ReifiedSpace { home: Some(home) }
    }

    /// Allocates a handle node over `home`.
    pub fn build(store: &mut Store, home: SpaceRef) -> NodeId {
        let space = ReifiedSpace::new(home);
        store.alloc(NodeValue::Space(space))
    }

    pub fn is_alive(&self) -> bool {
        self.home.is_some()
    }

    /// Engine reference. Defined only while alive; calling this on a
    /// killed handle is a programming error, not a recoverable failure.
    pub fn home(&self) -> &SpaceRef {
        self.home
            .as_ref()
            .expect("ReifiedSpace::home: handle was killed")
    }

    fn home_ref(&self) -> Option<&SpaceRef> {
        self.home.as_ref()
    }

    /// Fresh handle over an engine-cloned space.
    pub(crate) fn clone_home(&self) -> ReifiedSpace {
        ReifiedSpace::new(self.home().borrow().clone_space())
    }

    fn kill_in_place(&mut self) {
        if let Some(home) = self.home.take() {
            home.borrow_mut().kill();
        }
    }
}

pub fn is_space(store: &Store, value: NodeId) -> bool {
    matches!(store.resolve_value(value), NodeValue::Space(_))
}

/// Resolves `value` to a live handle's engine reference, or raises.
fn with_alive(store: &mut Store, value: NodeId, operation: &str) -> OpResult<SpaceRef> {
    let value = store.resolve(value);
    let home = match store.value(value) {
        NodeValue::Var(_) => return Err(store.wait(value)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            return store.raise(exception);
        }
        NodeValue::Space(space) => space.home_ref().cloned(),
        _ => return raise_type_error(store, "space", value),
    };
    match home {
        Some(home) => Ok(home),
        None => {
            let operation = store.atom(operation);
            raise(store, "deadSpace", &[operation])
        }
    }
}

/// Queries the space's solver status: `failed`, `merged`, `succeeded` or
/// `alternatives(n)`.
pub fn ask(store: &mut Store, value: NodeId) -> OpResult<NodeId> {
    let home = with_alive(store, value, "ask")?;
    let status = home.borrow().ask();
    Ok(status_value(store, status, false))
}

/// Like [`ask`], but `succeeded` carries its detail:
/// `succeeded(entailed)` or `succeeded(stuck)`.
pub fn ask_verbose(store: &mut Store, value: NodeId) -> OpResult<NodeId> {
    let home = with_alive(store, value, "askVerbose")?;
    let status = home.borrow().ask();
    Ok(status_value(store, status, true))
}

fn status_value(store: &mut Store, status: SpaceStatus, verbose: bool) -> NodeId {
    match status {
        SpaceStatus::Failed => store.atom("failed"),
        SpaceStatus::Merged => store.atom("merged"),
        SpaceStatus::Succeeded { entailed } => {
            if verbose {
                let label = store.atom("succeeded");
                let detail = store.atom(if entailed { "entailed" } else { "stuck" });
                Tuple::build_with(store, label, &[detail])
            } else {
                store.atom("succeeded")
            }
        }
        SpaceStatus::Alternatives(count) => {
            let label = store.atom("alternatives");
            let count = store.int(count as i64);
            Tuple::build_with(store, label, &[count])
        }
    }
}

/// Absorbs the space's outcome, producing its root value. Transitions the
/// space's internal state, never the handle's alive/killed state.
pub fn merge(store: &mut Store, value: NodeId) -> OpResult<NodeId> {
    let home = with_alive(store, value, "merge")?;
    let outcome = home.borrow_mut().merge(store)?;
    Ok(outcome)
}

/// Commits `decision` inside the space.
pub fn commit(store: &mut Store, value: NodeId, decision: NodeId) -> OpResult<()> {
    let home = with_alive(store, value, "commit")?;
    home.borrow_mut().commit(store, decision)?;
    Ok(())
}

/// Independent handle over an independently-continuable engine clone.
pub fn clone_space(store: &mut Store, value: NodeId) -> OpResult<NodeId> {
    let home = with_alive(store, value, "clone")?;
    let cloned = home.borrow().clone_space();
    Ok(ReifiedSpace::build(store, cloned))
}

/// Irreversibly invalidates the handle. The engine is told once; every
/// later operation on this handle, `kill` included, raises `deadSpace`.
pub fn kill(store: &mut Store, value: NodeId) -> OpResult<()> {
    with_alive(store, value, "kill")?;
    let value = store.resolve(value);
    match store.value_mut(value) {
        NodeValue::Space(space) => space.kill_in_place(),
        _ => unreachable!("with_alive checked the handle"),
    }
    Ok(())
}
