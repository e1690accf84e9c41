//! Dedup and persistence: the receiving end of the pipeline.
//!
//! Articles flow through [`Pipeline::submit`]: a well-formedness check, a
//! run-scoped dedup fast path, then an upsert against the configured
//! [`ArticleSink`]. Cross-run idempotence is the sink's upsert contract;
//! the in-memory dedup set is an optimization, not the correctness
//! mechanism.

mod dedup;
mod intake;
mod pipeline;
mod sqlite;
mod traits;

pub use dedup::DedupContext;
pub use intake::IntakeClient;
pub use pipeline::{Pipeline, SubmitOutcome};
pub use sqlite::SqliteSink;
pub use traits::{ArticleSink, SinkError, SinkResult};
