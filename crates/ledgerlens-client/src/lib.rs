pub mod aggregate;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
mod ingest;

pub use aggregate::{AggregateError, Summary, SummaryBundle, TransactionRecord, summarize};
pub use contracts::envelope::{CONTRACT_VERSION, FailureEnvelope, SuccessEnvelope};
pub use contracts::types::SummaryView;
pub use error::{ClientError, ClientResult};
