use crate::cli::Cli;
use crate::librenms::types::{ConnectionSettings, Endpoint, JsonPayload};
use crate::prelude::Result;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Prefix of environment variables providing default module arguments,
/// e.g. `LIBRENMS_API_URL` or `LIBRENMS_API_TOKEN`.
///
pub const ENV_PREFIX: &str = "LIBRENMS";

/// Arguments of a single module invocation.
///
/// Sources are layered from lowest to highest priority: `LIBRENMS_*`
/// environment variables, the JSON arguments file of the orchestration host,
/// then command line flags. Of the host's own `_ansible_*` entries only
/// `_ansible_check_mode` is read; the others are ignored.
///
#[derive(Deserialize)]
pub struct CallRequest {
    pub api_url: String,
    pub api_token: SecretString,
    pub endpoint: String,
    pub json_data: Option<Value>,
    ssl_verify: Option<bool>,
    timeout_sec: Option<u64>,
    #[serde(rename = "_ansible_check_mode")]
    check_mode: Option<bool>,
}

// `json_data` may carry device credentials (SNMP communities, passwords).
impl fmt::Debug for CallRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRequest")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token)
            .field("endpoint", &self.endpoint)
            .field("json_data", &self.json_data.as_ref().map(|_| "[REDACTED]"))
            .field("ssl_verify", &self.ssl_verify)
            .field("timeout_sec", &self.timeout_sec)
            .field("check_mode", &self.check_mode)
            .finish()
    }
}

impl CallRequest {
    /// Loads the arguments from `.env`, the process environment and `cli`.
    ///
    pub fn load(cli: &Cli) -> Result<Self> {
        match dotenv::dotenv() {
            Ok(path) => tracing::info!(target: "config", path = %path.display(), ".env loaded."),
            Err(error) if error.not_found() => tracing::debug!(target: "config", "No .env file."),
            Err(error) => return Err(error.into()),
        }

        Self::from_sources(cli, None)
    }

    /// Builds the arguments from explicit sources.
    ///
    /// # Arguments
    ///
    /// * `cli`: Parsed command line; provides the arguments file and overrides.
    /// * `environment`: Replacement for the process environment. `None` reads
    ///   the real environment.
    ///
    pub fn from_sources(cli: &Cli, environment: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(environment));
        if let Some(args_file) = &cli.args_file {
            builder = builder.add_source(
                config::File::from(args_file.as_path()).format(config::FileFormat::Json),
            );
        }

        let api_token = cli.api_token.as_ref().map(|token| token.expose_secret().to_owned());
        let request = builder
            .set_override_option("api_url", cli.api_url.clone())?
            .set_override_option("api_token", api_token)?
            .set_override_option("endpoint", cli.endpoint.clone())?
            .set_override_option("json_data", cli.json_data.clone())?
            .set_override_option("ssl_verify", cli.ssl_verify)?
            .set_override_option("timeout_sec", cli.timeout_sec)?
            .build()?
            .try_deserialize::<CallRequest>()?;
        tracing::info!(
            target: "config",
            api_url = %request.api_url,
            endpoint = %request.endpoint,
            "Module arguments loaded."
        );

        Ok(request)
    }

    /// Whether the server certificate is validated. Defaults to `true`.
    ///
    pub fn ssl_verify(&self) -> bool {
        self.ssl_verify.unwrap_or(true)
    }

    /// Whether the host asked for a dry run. Defaults to `false`.
    ///
    pub fn check_mode(&self) -> bool {
        self.check_mode.unwrap_or(false)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_sec.map(Duration::from_secs)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::from(self.endpoint.as_str())
    }

    /// Parses `json_data` into a request body, if any was given.
    ///
    pub fn payload(&self) -> Result<Option<JsonPayload>> {
        self.json_data
            .as_ref()
            .map(JsonPayload::from_argument)
            .transpose()
            .map(Option::flatten)
    }

    /// Connection settings for the client performing this call.
    ///
    pub fn connection(&self) -> ConnectionSettings {
        ConnectionSettings::new(&self.api_url, self.api_token.clone())
            .with_ssl_verify(self.ssl_verify())
            .with_timeout(self.timeout())
    }
}
