//! Orchestration-host surface shared by the module binaries.
//!
//! A module run loads its arguments, performs exactly one LibreNMS call and
//! prints a single JSON document on stdout: the call result on success, or
//! `{"failed": true, "msg": ..., "error_kind": ...}` on failure. Calls that
//! change remote state are skipped in check mode and report
//! `{"skipped": true, "msg": ...}`. The process exit code is `1` for failure
//! and `0` otherwise.

use crate::cli::Cli;
use crate::config::CallRequest;
use crate::librenms::client::LibreNmsClient;
use crate::prelude::*;
use crate::telemetry;
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing::Level;

/// Result document printed for the orchestration host.
///
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModuleOutput {
    Success(CallResult),
    Skipped {
        skipped: bool,
        msg: String,
    },
    Failure {
        failed: bool,
        msg: String,
        error_kind: ErrorKind,
    },
}

impl ModuleOutput {
    pub fn skipped(call: ApiCall) -> Self {
        ModuleOutput::Skipped {
            skipped: true,
            msg: format!("remote module ({}) does not support check mode", call.module_name()),
        }
    }

    pub fn failure(error: &Error) -> Self {
        ModuleOutput::Failure {
            failed: true,
            msg: error.to_string(),
            error_kind: error.kind(),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            ModuleOutput::Success(_) | ModuleOutput::Skipped { .. } => ExitCode::SUCCESS,
            ModuleOutput::Failure { .. } => ExitCode::FAILURE,
        }
    }

    /// Prints the document on stdout and returns the matching exit code.
    ///
    pub fn emit(&self) -> ExitCode {
        match serde_json::to_string(self) {
            Ok(json) => println!("{json}"),
            Err(error) => println!(
                "{}",
                serde_json::json!({"failed": true, "msg": error.to_string(), "error_kind": ErrorKind::Internal})
            ),
        }
        self.exit_code()
    }
}

impl From<CallResult> for ModuleOutput {
    fn from(result: CallResult) -> Self {
        ModuleOutput::Success(result)
    }
}

impl From<Error> for ModuleOutput {
    fn from(error: Error) -> Self {
        tracing::error!(target: "module", kind = %error.kind(), %error, "Call failed.");
        ModuleOutput::failure(&error)
    }
}

// -----------------------------------------------------------------------------

/// Full module lifecycle: logging, argument parsing, the call and its output.
///
/// # Arguments
///
/// * `call`: The call this binary performs.
///
pub async fn main(call: ApiCall) -> ExitCode {
    let subscriber = telemetry::get_subscriber(Level::INFO, std::io::stderr);
    if let Err(error) = telemetry::init_subscriber(subscriber) {
        return ModuleOutput::failure(&error).emit();
    }
    tracing::info!(target: "module", %call, "Start!");

    let cli = Cli::parse();
    run(call, &cli).await.unwrap_or_else(ModuleOutput::from).emit()
}

/// Loads the arguments described by `cli` and performs `call`.
///
/// In check mode only read-only calls reach the server; the others are
/// reported as skipped without building a client.
///
pub async fn run(call: ApiCall, cli: &Cli) -> Result<ModuleOutput> {
    let request = CallRequest::load(cli)?;
    if request.check_mode() && !call.is_read_only() {
        tracing::info!(target: "module", %call, "Check mode; skipping call.");
        return Ok(ModuleOutput::skipped(call));
    }

    let client = LibreNmsClient::new(request.connection());
    dispatch(&client, call, &request).await.map(ModuleOutput::from)
}

/// Performs `call` with the arguments of `request` through `api`.
///
/// The payload is parsed before any request is sent, so a malformed
/// `json_data` never reaches the server.
///
pub async fn dispatch<A>(api: &A, call: ApiCall, request: &CallRequest) -> Result<CallResult>
where
    A: LibreNms + Send + Sync + ?Sized,
{
    let endpoint = request.endpoint();

    match call {
        ApiCall::Get => {
            warn_unused_payload(call, request);
            api.get(&endpoint).await
        }
        ApiCall::Add => api.add(&endpoint, request.payload()?).await,
        ApiCall::Delete => {
            warn_unused_payload(call, request);
            api.delete(&endpoint).await
        }
    }
}

fn warn_unused_payload(call: ApiCall, request: &CallRequest) {
    if request.json_data.is_some() {
        tracing::warn!(target: "module", %call, "`json_data` is only sent by add calls; ignoring it.");
    }
}
