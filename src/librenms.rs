pub mod client;
pub mod types;

// -----------------------------------------------------------------------------

use crate::prelude::Result;
use crate::librenms::types::*;
use async_trait::async_trait;

/// Verb-level operations against the LibreNMS API.
///
/// Every method issues exactly one HTTP request and classifies the response
/// into a [`CallResult`] or an error. Nothing is retried.
///
#[async_trait]
pub trait LibreNms {
    async fn get(&self, endpoint: &Endpoint) -> Result<CallResult>;
    async fn add(&self, endpoint: &Endpoint, payload: Option<JsonPayload>) -> Result<CallResult>;
    async fn delete(&self, endpoint: &Endpoint) -> Result<CallResult>;
}
