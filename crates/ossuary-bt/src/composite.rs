//! Control-flow composites.
//!
//! Children are ticked in declaration order and never twice in one tick. `Selector` and
//! `Sequence` remember which child returned `Running` and resume there next tick, but rewind to
//! the first child once a pass finishes either way. The parallel composites re-run every child
//! each tick and rely on the children's own progress state.

use ossuary_core::{EntityId, TickContext};

use crate::bt::{BoxedNode, Node, Status};

fn assert_children<W: 'static>(kind: &str, children: &[BoxedNode<W>]) {
    assert!(!children.is_empty(), "{kind} must have at least one child");
}

/// First-to-succeed.
///
/// A failing child moves the cursor on within the same tick. `Running` is returned with the
/// cursor parked on that child. `Success` and the all-failed `Failure` both end the pass and
/// rewind the cursor, so the next tick starts again from the first child.
///
/// The cursor is not left on the child that succeeded. A later child's success therefore does
/// not stick: higher-priority children get re-checked first on the following tick.
pub struct Selector<W>
where
    W: 'static,
{
    children: Vec<BoxedNode<W>>,
    index: usize,
}

impl<W> Selector<W>
where
    W: 'static,
{
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedNode<W>>) -> Self {
        assert_children("Selector", &children);
        Self { children, index: 0 }
    }

    /// Child the next tick starts from.
    pub fn cursor(&self) -> usize {
        self.index
    }
}

impl<W> Node<W> for Selector<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx, agent, world) {
                Status::Running => return Status::Running,
                Status::Success => {
                    self.index = 0;
                    return Status::Success;
                }
                Status::Failure => self.index += 1,
            }
        }

        self.index = 0;
        Status::Failure
    }
}

/// First-to-fail.
///
/// Any failure aborts the whole pass and rewinds the cursor; the next tick restarts at the
/// first child rather than retrying the failed one.
pub struct Sequence<W>
where
    W: 'static,
{
    children: Vec<BoxedNode<W>>,
    index: usize,
}

impl<W> Sequence<W>
where
    W: 'static,
{
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedNode<W>>) -> Self {
        assert_children("Sequence", &children);
        Self { children, index: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.index
    }
}

impl<W> Node<W> for Sequence<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx, agent, world) {
                Status::Running => return Status::Running,
                Status::Failure => {
                    self.index = 0;
                    return Status::Failure;
                }
                Status::Success => self.index += 1,
            }
        }

        self.index = 0;
        Status::Success
    }
}

/// Race to success: the first child to succeed wins the tick, and the node only fails once
/// every child fails in the same tick.
pub struct SuccessParallel<W>
where
    W: 'static,
{
    children: Vec<BoxedNode<W>>,
}

impl<W> SuccessParallel<W>
where
    W: 'static,
{
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedNode<W>>) -> Self {
        assert_children("SuccessParallel", &children);
        Self { children }
    }
}

impl<W> Node<W> for SuccessParallel<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let mut failures = 0;
        for child in self.children.iter_mut() {
            match child.tick(ctx, agent, world) {
                Status::Success => return Status::Success,
                Status::Failure => failures += 1,
                Status::Running => {}
            }
        }

        if failures == self.children.len() {
            Status::Failure
        } else {
            Status::Running
        }
    }
}

/// All must succeed: any failure fails the tick immediately, success needs every child to
/// succeed in the same tick.
pub struct FailParallel<W>
where
    W: 'static,
{
    children: Vec<BoxedNode<W>>,
}

impl<W> FailParallel<W>
where
    W: 'static,
{
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedNode<W>>) -> Self {
        assert_children("FailParallel", &children);
        Self { children }
    }
}

impl<W> Node<W> for FailParallel<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let mut successes = 0;
        for child in self.children.iter_mut() {
            match child.tick(ctx, agent, world) {
                Status::Failure => return Status::Failure,
                Status::Success => successes += 1,
                Status::Running => {}
            }
        }

        if successes == self.children.len() {
            Status::Success
        } else {
            Status::Running
        }
    }
}
