mod calc;
mod catalog;
mod chat;
mod config;
mod db;
mod ipc;
mod model;
mod session;

use anyhow::Result;
use clap::Parser;
use config::Cli;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout is reserved for protocol lines.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let chat_cfg = cli.chat_config();
    if chat_cfg.api_key.is_none() {
        tracing::warn!("no API key configured; the study assistant will answer with an error message");
    }
    let relay = chat::GeminiRelay::new(&chat_cfg.api_base, chat_cfg.api_key)?;
    let mut state = ipc::AppState::new(Box::new(relay), chat_cfg.model);

    if let Some(path) = cli.workspace.as_deref() {
        if let Err(e) = state.open_workspace(path) {
            tracing::warn!(workspace = %path.display(), error = %e, "could not open workspace; running in memory");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        tracing::debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    Ok(())
}
