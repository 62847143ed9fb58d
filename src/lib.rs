pub mod cli;
pub mod config;
pub mod error;
pub mod librenms;
pub mod module;
pub mod telemetry;

pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::librenms::LibreNms;
    pub use crate::librenms::types::{ApiCall, CallResult, Endpoint, JsonPayload};
}
