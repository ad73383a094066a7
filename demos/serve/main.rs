//! # serve demo
//!
//! A stand-in service binary that takes all of its configuration from one
//! struct through confbind. It does not serve anything; it prints what it
//! would run with.
//!
//! ```sh
//! cargo run --example serve
//! cargo run --example serve -- -addr localhost:9000 -timeout 30s
//! API_KEY=secret BATCH_SIZE=500 cargo run --example serve -- -debug
//! cargo run --example serve -- flags      # flag table as JSON
//! cargo run --example serve -- -h
//! ```

use std::process::ExitCode;
use std::time::Duration;

use confbind::{BindError, Binder, Configurable};

#[derive(Configurable, Default)]
struct ServeConfig {
    #[flag(name = "addr", value = ":8000", usage = "Listen and serve address")]
    addr: String,

    #[flag(
        name = "databaseUrl",
        value = "mongodb://localhost:27017/db",
        usage = "Database connection url"
    )]
    database_url: String,

    #[flag(name = "timeout", value = "200ms", usage = "Timeout value")]
    timeout: Duration,

    #[flag(name = "apiKey", env_var = "API_KEY", usage = "API key")]
    api_key: String,

    #[flag(name = "batchSize", value = "100", env_var = "BATCH_SIZE", usage = "Batch size for query")]
    batch_size: i32,

    #[flag(name = "maxCount", usage = "Maximum number of documents")]
    max_count: i64,

    #[flag(name = "debug", env_var = "DEBUG", usage = "Enable debug output")]
    debug: bool,
}

fn binder() -> Binder {
    Binder::new("serve").about("confbind demo service")
}

fn print_flags() -> ExitCode {
    let flags = match binder().flags(&mut ServeConfig::default()) {
        Ok(flags) => flags,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&flags) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render flags: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let mut config = ServeConfig::default();
    let parsed = match binder().bind_from(&mut config, std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(BindError::Arguments(e)) => e.exit(),
        Err(e) => {
            eprintln!("Failed to load config:\n{e}");
            return ExitCode::FAILURE;
        }
    };

    if parsed.args.first().map(String::as_str) == Some("flags") {
        return print_flags();
    }

    let api_key = if config.api_key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    };
    let entries = [
        ("addr", config.addr.clone()),
        ("databaseUrl", config.database_url.clone()),
        ("timeout", format!("{:?}", config.timeout)),
        ("apiKey", api_key.to_string()),
        ("batchSize", config.batch_size.to_string()),
        ("maxCount", config.max_count.to_string()),
        ("debug", config.debug.to_string()),
    ];

    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in &entries {
        let marker = if parsed.is_set(key) { "*" } else { " " };
        println!("{marker} {key:<width$}  {value}");
    }
    if config.debug && !parsed.args.is_empty() {
        println!();
        println!("positional arguments: {:?}", parsed.args);
    }

    ExitCode::SUCCESS
}
