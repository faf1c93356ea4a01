//! Tooling primitives for ossuary trees.
//!
//! Engine-agnostic and allocation-light; rendering of the recorded data belongs to whatever
//! front end consumes it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, Tracer, VecTraceSink};
