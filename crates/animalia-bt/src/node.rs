//! The closed set of node kinds and their tick semantics.
//!
//! Composites never hold mutable state themselves. The child index a
//! composite resumes from lives in the entity's [`NodeStates`] slot for the
//! composite's [`NodeId`], which is what lets a single tree definition be
//! ticked on behalf of many entities.
//!
//! [`NodeStates`]: crate::context::NodeStates

use core::fmt;

use tracing::trace;

use crate::context::TickContext;
use crate::id::NodeId;
use crate::status::Status;

/// Boxed body of an action leaf.
pub type ActionFn<B, W> = Box<dyn Fn(&mut TickContext<'_, B, W>) -> Status + Send + Sync>;

/// Boxed predicate of a condition leaf. Receives a shared context only.
pub type ConditionFn<B, W> = Box<dyn Fn(&TickContext<'_, B, W>) -> bool + Send + Sync>;

/// A behavior-tree node.
pub enum Node<B, W> {
    /// Ticks children in order until one fails or is still running.
    Sequence {
        /// Resumption slot.
        id: NodeId,
        /// Children, ticked left to right.
        children: Vec<Self>,
    },
    /// Ticks children in order until one succeeds or is still running.
    Selector {
        /// Resumption slot.
        id: NodeId,
        /// Children, tried left to right.
        children: Vec<Self>,
    },
    /// Runs a function that may mutate the blackboard and the world.
    Action {
        /// Slot (unused by the node itself, reserved for uniqueness).
        id: NodeId,
        /// Name used in diagnostics.
        name: &'static str,
        /// The action body.
        run: ActionFn<B, W>,
    },
    /// Evaluates a read-only predicate.
    Condition {
        /// Slot (unused by the node itself, reserved for uniqueness).
        id: NodeId,
        /// Name used in diagnostics.
        name: &'static str,
        /// The predicate.
        check: ConditionFn<B, W>,
    },
}

impl<B, W> Node<B, W> {
    /// Build a sequence composite.
    pub const fn sequence(id: NodeId, children: Vec<Self>) -> Self {
        Self::Sequence { id, children }
    }

    /// Build a selector composite.
    pub const fn selector(id: NodeId, children: Vec<Self>) -> Self {
        Self::Selector { id, children }
    }

    /// Build an action leaf.
    pub fn action<F>(id: NodeId, name: &'static str, run: F) -> Self
    where
        F: Fn(&mut TickContext<'_, B, W>) -> Status + Send + Sync + 'static,
    {
        Self::Action {
            id,
            name,
            run: Box::new(run),
        }
    }

    /// Build a condition leaf.
    pub fn condition<F>(id: NodeId, name: &'static str, check: F) -> Self
    where
        F: Fn(&TickContext<'_, B, W>) -> bool + Send + Sync + 'static,
    {
        Self::Condition {
            id,
            name,
            check: Box::new(check),
        }
    }

    /// This node's ID.
    pub const fn id(&self) -> NodeId {
        match self {
            Self::Sequence { id, .. }
            | Self::Selector { id, .. }
            | Self::Action { id, .. }
            | Self::Condition { id, .. } => *id,
        }
    }

    /// Diagnostic name: the leaf name, or the composite kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sequence { .. } => "sequence",
            Self::Selector { .. } => "selector",
            Self::Action { name, .. } | Self::Condition { name, .. } => *name,
        }
    }

    /// Children of a composite; empty for leaves.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Sequence { children, .. } | Self::Selector { children, .. } => children,
            Self::Action { .. } | Self::Condition { .. } => &[],
        }
    }

    /// Visit this node and every descendant, parent first.
    pub fn walk<'n>(&'n self, visit: &mut impl FnMut(&'n Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Tick this node once.
    pub fn tick(&self, ctx: &mut TickContext<'_, B, W>) -> Status {
        match self {
            Self::Sequence { id, children } => tick_sequence(*id, children, ctx),
            Self::Selector { id, children } => tick_selector(*id, children, ctx),
            Self::Action { id, name, run } => {
                let status = run(ctx);
                trace!(node = %id, action = name, %status, "action ticked");
                status
            }
            Self::Condition { check, .. } => Status::from_bool(check(ctx)),
        }
    }
}

fn tick_sequence<B, W>(id: NodeId, children: &[Node<B, W>], ctx: &mut TickContext<'_, B, W>) -> Status {
    let mut current = ctx.resume_index(id);
    while let Some(child) = children.get(current) {
        match child.tick(ctx) {
            Status::Success => current = current.saturating_add(1),
            Status::Failure => {
                ctx.set_resume_index(id, 0);
                return Status::Failure;
            }
            Status::Running => {
                ctx.set_resume_index(id, current);
                return Status::Running;
            }
        }
    }
    ctx.set_resume_index(id, 0);
    Status::Success
}

fn tick_selector<B, W>(id: NodeId, children: &[Node<B, W>], ctx: &mut TickContext<'_, B, W>) -> Status {
    let mut current = ctx.resume_index(id);
    while let Some(child) = children.get(current) {
        match child.tick(ctx) {
            Status::Success => {
                ctx.set_resume_index(id, 0);
                return Status::Success;
            }
            Status::Failure => current = current.saturating_add(1),
            Status::Running => {
                ctx.set_resume_index(id, current);
                return Status::Running;
            }
        }
    }
    ctx.set_resume_index(id, 0);
    Status::Failure
}

impl<B, W> fmt::Debug for Node<B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence { id, children } => f
                .debug_struct("Sequence")
                .field("id", id)
                .field("children", children)
                .finish(),
            Self::Selector { id, children } => f
                .debug_struct("Selector")
                .field("id", id)
                .field("children", children)
                .finish(),
            Self::Action { id, name, .. } => f
                .debug_struct("Action")
                .field("id", id)
                .field("name", name)
                .finish_non_exhaustive(),
            Self::Condition { id, name, .. } => f
                .debug_struct("Condition")
                .field("id", id)
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}
