//! `taskdesk` entry point: loads configuration, installs logging and runs one
//! command inside a trace scope.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use frontend::TraceId;
use frontend::config::ClientSettings;
use frontend::inbound::cli::{self, Cli};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut settings = ClientSettings::load_from_iter([OsString::from("taskdesk")])
        .map_err(|error| eyre!("load configuration: {error}"))?;
    settings.override_with(args.api_url.clone(), args.session_dir.clone());
    init_tracing(settings.json_logs);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let trace_id = TraceId::generate();
    debug!(%trace_id, "running command");
    let output = runtime.block_on(TraceId::scope(trace_id, cli::execute(args.command, &settings)))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
