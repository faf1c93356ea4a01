//! Leaf nodes: the tree's contact points with the world.
//!
//! Leaves hold entity handles and scalar progress only. Anything they refer to may have
//! disappeared since the last tick, in which case the leaf fails.

mod combat;
mod grab;
mod lifecycle;
mod movement;
mod presentation;
mod sound;
mod wait;

pub use combat::Attack;
pub use grab::{Aim, DropHeld, FocusOnSound, Pickup, Throw};
pub use lifecycle::{KillSpawnable, Merge, SpawnAt, SpawnPrefab, Split};
pub use movement::{MoveForward, MoveTo, MoveToNearestThrowable, RandomWalk, Rotate, SetTarget};
pub use presentation::{DisplayText, Log, PlayAnimation, PlayParticles, StopParticles};
pub use sound::{MakeSound, StopSound};
pub use wait::Wait;
