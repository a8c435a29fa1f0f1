//! Giftscan engine: remote item fetching and the gated fan-out query pipeline.
mod fetch;
mod gate;
mod pipeline;
mod types;

pub use fetch::{FetchSettings, ItemFetcher, ReqwestItemFetcher, PRIVACY_MARKERS};
pub use gate::{AdmissionGate, GateClosed, GatePermit};
pub use pipeline::{PipelineSettings, QueryPipeline};
pub use types::{FailureKind, FetchError};
