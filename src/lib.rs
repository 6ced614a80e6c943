mod aggregator;
mod client_utils;
mod compose;
mod errors;
mod ext;
pub mod google;
mod invoker;
mod model;
pub mod sources;
mod task;
mod types;

pub use aggregator::{ContextAggregator, SourceOutcomes};
pub use compose::{compose, NO_ACTIVITY_PHRASE, TSUNAMI_MARKER};
pub use errors::*;
pub use invoker::ModelInvoker;
pub use model::GenerativeModel;
pub use task::Task;
pub use types::*;
