pub mod payload;

// -------------------------------------------------------------------------

use async_trait::async_trait;
use librenms::cli::Cli;
use librenms::module::ModuleOutput;
use librenms::prelude::{ApiCall, CallResult, Endpoint, JsonPayload, LibreNms, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Mutex;
use wiremock::MockServer;

pub const TOKEN: &str = "0123456789abcdef0123456789abcdef";

/// Test helper that runs a mock LibreNMS server in the background and builds
/// module command lines pointing at it.
///
pub struct TestApi {
    pub server: MockServer,
}

impl TestApi {
    pub async fn new() -> Self {
        TestApi {
            server: MockServer::start().await,
        }
    }

    /// Command line passing every argument as a flag.
    ///
    pub fn cli(&self, endpoint: &str, json_data: Option<&str>) -> Cli {
        Cli {
            api_url: Some(self.server.uri()),
            api_token: Some(TOKEN.into()),
            endpoint: Some(endpoint.to_owned()),
            json_data: json_data.map(str::to_owned),
            ..Default::default()
        }
    }

    /// Command line pointing at an arguments file, the way the host calls a
    /// module.
    ///
    pub fn cli_with_args_file(&self, name: &str, mut args: Value) -> Cli {
        args["api_url"] = Value::from(self.server.uri());
        args["api_token"] = Value::from(TOKEN);

        let path = args_file_path(name);
        std::fs::write(&path, args.to_string()).unwrap();

        Cli {
            args_file: Some(path),
            ..Default::default()
        }
    }
}

/// Unwraps the call result of a successful module run.
///
pub fn call_result(output: ModuleOutput) -> CallResult {
    match output {
        ModuleOutput::Success(result) => result,
        other => panic!("expected a call result, got {:?}", other),
    }
}

fn args_file_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("librenms-api-{}-{}.json", std::process::id(), name))
}

// -------------------------------------------------------------------------

/// Mock LibreNMS client recording every call it receives.
///
#[derive(Default)]
pub struct MockLibreNmsClient {
    pub calls: Mutex<Vec<(ApiCall, Endpoint, Option<JsonPayload>)>>,
}

impl MockLibreNmsClient {
    fn record(&self, call: ApiCall, endpoint: &Endpoint, payload: Option<JsonPayload>) -> CallResult {
        self.calls
            .lock()
            .unwrap()
            .push((call, endpoint.clone(), payload));
        CallResult {
            changed: call != ApiCall::Get,
            status_code: 200,
            data: serde_json::json!({"status": "ok"}),
        }
    }
}

#[async_trait]
impl LibreNms for MockLibreNmsClient {
    async fn get(&self, endpoint: &Endpoint) -> Result<CallResult> {
        Ok(self.record(ApiCall::Get, endpoint, None))
    }
    async fn add(&self, endpoint: &Endpoint, payload: Option<JsonPayload>) -> Result<CallResult> {
        Ok(self.record(ApiCall::Add, endpoint, payload))
    }
    async fn delete(&self, endpoint: &Endpoint) -> Result<CallResult> {
        Ok(self.record(ApiCall::Delete, endpoint, None))
    }
}
