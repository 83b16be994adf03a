mod error;
mod record;

pub use error::{RecordError, RecordIssue};
pub use record::{Record, RecordId};
