//! Looks up one code and prints a FHIR `Parameters` resource.
//!
//! Usage: `umls-lookup <system> <code>`

use std::process::ExitCode;

use umls_loader::{operation_outcome, TerminologyStore};
use umls_service::{init_tracing, ServiceConfig};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [system, code] = args.as_slice() else {
        eprintln!("usage: umls-lookup <system> <code>");
        return Ok(ExitCode::from(2));
    };

    let config = ServiceConfig::from_env();
    let store = TerminologyStore::open(&config.db_path)?;

    match store.lookup(system, code) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result.to_parameters())?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_input_error() => {
            tracing::debug!("Lookup failed: {}", e);
            println!("{}", serde_json::to_string_pretty(&operation_outcome(&e))?);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
