//! A small headless world for running trees outside an engine.
//!
//! Navigation walks straight lines inside a square arena, thrown bodies slide with drag and
//! report an impact on whatever they run into, and held bodies ride along with their holder.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod template;

pub use arena::{Arena, ArenaConfig, Body};
pub use error::ArenaError;
pub use template::Template;
