use librenms::module;
use librenms::prelude::ApiCall;
use std::process::ExitCode;

/// Creates a resource through the LibreNMS API.
///
#[tokio::main]
async fn main() -> ExitCode {
    module::main(ApiCall::Add).await
}
