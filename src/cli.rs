use secrecy::SecretString;
use std::convert::Infallible;
use std::path::PathBuf;

/// Command line of every LibreNMS module binary.
///
/// The orchestration host passes the path of its JSON arguments file as the
/// only positional argument. The flags are for running a module by hand and
/// override values from the file.
///
#[derive(Debug, Default, clap::Parser)]
#[command(
    name = "librenms",
    version,
    about = "Single-call LibreNMS API module for orchestration hosts"
)]
pub struct Cli {
    #[arg(help = "JSON arguments file written by the orchestration host", env = "LIBRENMS_ARGS_FILE")]
    pub args_file: Option<PathBuf>,
    #[arg(long, help = "Base URL of the LibreNMS server")]
    pub api_url: Option<String>,
    #[arg(long, help = "API token sent in the X-Auth-Token header", value_parser = secret)]
    pub api_token: Option<SecretString>,
    #[arg(long, help = "Endpoint below /api/v0/, filters included")]
    pub endpoint: Option<String>,
    #[arg(long, help = "JSON body for POST calls, single quotes allowed")]
    pub json_data: Option<String>,
    #[arg(long, help = "Validate the server TLS certificate [default: true]")]
    pub ssl_verify: Option<bool>,
    #[arg(long, help = "Whole-request timeout in seconds [default: none]")]
    pub timeout_sec: Option<u64>,
}

fn secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(value.into())
}
