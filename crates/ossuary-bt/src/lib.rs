//! Resumable behaviour trees evaluated once per simulation tick.
//!
//! Nodes are generic over the world they act on and only require the capability traits from
//! `ossuary-core` they actually use, so the same tree runs against the sandbox arena or any
//! other world that implements those traits.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod archetypes;
pub mod brain;
pub mod bt;
pub mod composite;
pub mod condition;
pub mod interruptor;
pub mod leaves;
pub mod perception;
pub mod tuning;

pub use brain::{Brain, BrainConfig, Population, TickReport, Tree, TreeFactory};
pub use bt::{BoxedNode, Node, NodeExt, Status};
pub use composite::{FailParallel, Selector, Sequence, SuccessParallel};
pub use condition::{
    Check, Conditional, FlagCheck, HeldKind, Impacted, IsHeld, IsThrowing, Predicate, ShouldSplit,
};
pub use interruptor::Interruptor;
pub use perception::{SoundInRange, TargetInView, ThrowableInView};
pub use tuning::Tuning;
