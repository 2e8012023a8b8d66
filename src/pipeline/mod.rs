pub mod runner;
pub mod stage1_index;
pub mod stage2_centroids;
pub mod stage3_decode;
pub mod stage4_select;
pub mod stage5_cluster;
pub mod stage6_compare;
pub mod stage7_report;

use thiserror::Error;

use crate::input::InputError;
use crate::model::CapabilityError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unknown subtype '{0}': no samples carry this label")]
    UnknownSubtype(String),
    #[error("empty group '{0}': cannot summarize zero rows")]
    EmptyGroup(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("external capability failure ({0})")]
    ExternalCapabilityFailure(#[from] CapabilityError),
    #[error("degenerate attribute axis for {0}: centroids coincide")]
    DegenerateAxis(String),
    #[error("{0} of {1} analyses failed")]
    Incomplete(usize, usize),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
