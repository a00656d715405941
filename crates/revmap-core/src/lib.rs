//! revmap-core — shared data model, graph arena, and cooperative
//! cancellation/progress primitives used by every stage of the
//! reverse-engineering pipeline.

pub mod error;
pub mod graph;
pub mod model;
pub mod progress;

pub use error::{Diagnostic, Outcome, PipelineError};
pub use graph::{find_cycles, EdgeId, Graph, NodeId};
pub use model::*;
pub use progress::{silent_reporter, CancellationToken, Progress, ProgressReporter};
