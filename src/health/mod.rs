mod checks;
mod error;
mod models;

pub use checks::Prober;
pub use error::{ProbeError, ProberError};
pub use models::{AggregateReport, HttpMethod, OverallStatus, ProbeResult, Target};
