use ossuary_core::{EntityId, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    Success,
    Failure,
}

impl Status {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Status::Success
        } else {
            Status::Failure
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }

    pub fn trace_tag(self) -> &'static str {
        match self {
            Status::Running => "tree.running",
            Status::Success => "tree.success",
            Status::Failure => "tree.failure",
        }
    }
}

/// One unit of behaviour.
///
/// `tick` does at most one step of visible work. Returning [`Status::Running`] promises that
/// the next call resumes the same operation; any progress needed for that lives in the node's
/// own fields. `agent` is the entity whose tree is being ticked.
pub trait Node<W>: 'static
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status;
}

pub type BoxedNode<W> = Box<dyn Node<W>>;

pub trait NodeExt<W: 'static>: Node<W> + Sized {
    fn boxed(self) -> BoxedNode<W> {
        Box::new(self)
    }
}

impl<W: 'static, N: Node<W>> NodeExt<W> for N {}
