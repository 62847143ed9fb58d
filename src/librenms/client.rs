use crate::librenms::LibreNms;
use crate::librenms::types::*;
use crate::prelude::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use tokio::sync::OnceCell;

/// Header carrying the LibreNMS API token.
///
pub const AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// Concrete implementation of the `LibreNms` trait using `reqwest` crate.
///
/// Translates the abstract operations defined in the `LibreNms` trait into
/// actual HTTP API calls against a single LibreNMS server.
///
pub struct LibreNmsClient {
    client: OnceCell<Client>,
    settings: ConnectionSettings,
}

impl LibreNmsClient {
    /// Creates a new instance of the LibreNMS client.
    ///
    /// # Arguments
    ///
    /// * `settings`: Server URL, token and TLS options used by every request
    ///   of this client.
    ///
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            client: OnceCell::new(),
            settings,
        }
    }

    /// Lazily initializes and returns a reference to the `reqwest::Client`.
    ///
    /// The client is built on the first call with the token as a default
    /// header. Certificate validation is only disabled when the settings ask
    /// for it, and only for this client.
    ///
    async fn get_client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                let mut token = HeaderValue::from_str(self.settings.token.expose_secret())?;
                token.set_sensitive(true);

                let mut headers = HeaderMap::new();
                headers.insert(AUTH_TOKEN, token);

                let mut builder = Client::builder().default_headers(headers).use_rustls_tls();
                if !self.settings.ssl_verify {
                    tracing::warn!(target: "librenms", url = %self.settings.url, "TLS certificate verification disabled.");
                    builder = builder.danger_accept_invalid_certs(true);
                }
                if let Some(timeout) = self.settings.timeout {
                    builder = builder.timeout(timeout);
                }

                builder.build().map_err(Error::from)
            })
            .await
    }

    /// Generic helper method to perform a request to the LibreNMS API.
    ///
    /// Sends exactly one request and hands the status and body over to the
    /// call-specific classification.
    ///
    /// # Arguments
    ///
    /// * `call`: Which call is performed; selects method and status policy.
    /// * `endpoint`: API endpoint, relative to `/api/v0/`.
    /// * `payload`: Optional JSON body. When absent, neither a body nor a
    ///   content type is sent.
    ///
    #[tracing::instrument(target = "librenms", skip_all, fields(%call, %endpoint))]
    async fn make_request(
        &self,
        call: ApiCall,
        endpoint: &Endpoint,
        payload: Option<JsonPayload>,
    ) -> Result<CallResult> {
        let client = self.get_client().await?;
        let url = self.settings.url_for(endpoint);

        let mut request = client.request(call.method(), &url);
        if let Some(payload) = payload {
            request = request.json(payload.as_value());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(target: "librenms", %status, body = %text, "Response received.");

        let result = call.classify(endpoint, status, text)?;
        tracing::info!(target: "librenms", %status, changed = result.changed, "Call completed.");

        Ok(result)
    }
}

#[async_trait]
impl LibreNms for LibreNmsClient {
    async fn get(&self, endpoint: &Endpoint) -> Result<CallResult> {
        self.make_request(ApiCall::Get, endpoint, None).await
    }

    async fn add(&self, endpoint: &Endpoint, payload: Option<JsonPayload>) -> Result<CallResult> {
        self.make_request(ApiCall::Add, endpoint, payload).await
    }

    async fn delete(&self, endpoint: &Endpoint) -> Result<CallResult> {
        self.make_request(ApiCall::Delete, endpoint, None).await
    }
}
