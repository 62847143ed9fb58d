use librenms::module;
use librenms::prelude::ApiCall;
use std::process::ExitCode;

/// Reads a LibreNMS API endpoint.
///
#[tokio::main]
async fn main() -> ExitCode {
    module::main(ApiCall::Get).await
}
