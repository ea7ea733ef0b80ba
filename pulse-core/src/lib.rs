//! Platform-independent core of the DecisionPulse dashboard: the response
//! model, everything the views derive from it, and the upload contract that
//! both the web app and the CLI drive.

pub mod chart;
pub mod config;
pub mod error;
pub mod insights;
pub mod metrics;
pub mod store;
pub mod types;
pub mod upload;
pub mod view_state;

pub use config::ApiConfig;
pub use error::{PulseError, UploadError, ValidationError, UPLOAD_FAILED_MESSAGE};
pub use store::{MemoryStore, ResultStore, UploadTicket};
pub use types::{AnalysisResult, ResponseMeta, RiskLevel, UserRecord};
pub use upload::{submit, HttpReply, Transport};
