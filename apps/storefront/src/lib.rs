//! # Paradise Storefront Library
//!
//! Checkout session and command dispatcher for the Paradise storefront.
//! This is the main entry point that configures and runs the request loop.
//!
//! ## Module Organization
//! ```text
//! paradise_storefront_lib/
//! ├── lib.rs           ◄─── You are here (startup & request loop)
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── session.rs   ◄─── CheckoutSession (cart, mode, saved details)
//! │   └── config.rs    ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs       ◄─── Request/Response, dispatch
//! │   ├── cart.rs      ◄─── Cart manipulation commands
//! │   ├── checkout.rs  ◄─── Fulfillment, payment form, order commands
//! │   ├── promo.rs     ◄─── Promo code command
//! │   └── config.rs    ◄─── Config command
//! └── error.rs         ◄─── API error type for commands
//! ```
//!
//! ## Request Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin (one JSON request per line)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serve() ──► commands::handle_line() ──► CheckoutSession               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stdout (one JSON response per line)                                   │
//! │                                                                         │
//! │  stderr: tracing output, so stdout stays a clean response channel      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use paradise_store::{CartStore, FileSlot, KeyValueSlot, MemorySlot};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use state::{CheckoutSession, ConfigState};

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(name = "paradise-storefront")]
#[command(version, about = "Paradise storefront checkout engine (JSON lines on stdin/stdout)")]
pub struct Cli {
    /// Config file (default: <config dir>/storefront.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep the cart in memory only; nothing is written to disk
    #[arg(long)]
    pub memory: bool,
}

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,paradise=debug, can be overridden with RUST_LOG     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → PARADISE_* env                      │
/// │     • a broken config falls back to defaults with a warning            │
/// │                                                                         │
/// │  3. Open Cart Slot ───────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/paradise_cart_v1.json            │
/// │     • --memory or no data dir: in-memory slot                           │
/// │                                                                         │
/// │  4. Open Checkout Session ────────────────────────────────────────────► │
/// │     • Cart restored from the slot (unreadable → empty)                  │
/// │                                                                         │
/// │  5. Serve Requests until stdin closes                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting Paradise storefront");

    let config = ConfigState::load_or_default(cli.config.as_deref());
    info!(store = %config.store_name, cart_key = %config.cart_key, "Configuration loaded");

    let slot = open_slot(&config, cli.memory);
    let store = CartStore::with_key(slot, config.cart_key.clone());
    let mut session = CheckoutSession::open(store, config.pricing_policy());

    let stdin = io::stdin();
    let stdout = io::stdout();
    match serve(&mut session, &config, stdin.lock(), stdout.lock()) {
        Ok(handled) => {
            info!(requests = handled, "Input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Request stream failed");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=paradise=trace` - Show trace for paradise crates only
/// - Default: INFO, DEBUG for paradise crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,paradise=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Picks the slot the cart lives in.
///
/// ## Resolution
/// 1. `--memory`: in-memory
/// 2. `data_dir` from config / `PARADISE_DATA_DIR`
/// 3. Platform data directory
/// 4. In-memory, with a warning
fn open_slot(config: &ConfigState, memory: bool) -> Box<dyn KeyValueSlot> {
    if memory {
        info!("Using in-memory cart slot");
        return Box::new(MemorySlot::new());
    }

    match config.data_dir.clone().or_else(FileSlot::default_dir) {
        Some(dir) => {
            info!(?dir, "Using file cart slot");
            Box::new(FileSlot::new(dir))
        }
        None => {
            warn!("No data directory available, cart will not survive a restart");
            Box::new(MemorySlot::new())
        }
    }
}

/// Reads requests from `reader` until EOF, writing one response line each.
///
/// Blank lines are skipped. Returns the number of requests handled; only
/// I/O failures on the streams themselves end the loop early.
pub fn serve<S, R, W>(
    session: &mut CheckoutSession<S>,
    config: &ConfigState,
    reader: R,
    mut writer: W,
) -> io::Result<usize>
where
    S: KeyValueSlot,
    R: BufRead,
    W: Write,
{
    let mut handled = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = commands::handle_line(session, config, &line);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }

    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Response;
    use std::io::Cursor;

    fn run_lines(session: &mut CheckoutSession<MemorySlot>, input: &str) -> Vec<Response> {
        let config = ConfigState::default();
        let mut out = Vec::new();
        serve(session, &config, Cursor::new(input), &mut out).unwrap();

        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn session() -> CheckoutSession<MemorySlot> {
        CheckoutSession::open(
            CartStore::new(MemorySlot::new()),
            ConfigState::default().pricing_policy(),
        )
    }

    #[test]
    fn test_serve_one_response_per_request() {
        let mut session = session();
        let input = concat!(
            "{\"command\":\"add_to_cart\",\"name\":\"Burger\",\"price\":\"8.00\"}\n",
            "\n",
            "garbage\n",
            "{\"command\":\"get_cart\"}\n",
        );

        let responses = run_lines(&mut session, input);
        assert_eq!(responses.len(), 3);
        assert!(responses[0].ok);
        assert!(!responses[1].ok);
        assert!(responses[2].ok);
        assert_eq!(responses[2].data.as_ref().unwrap()["itemCount"], 1);
    }

    #[test]
    fn test_cart_survives_restart_with_file_slot() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::default();
        let open = || {
            CheckoutSession::open(
                CartStore::new(FileSlot::new(dir.path())),
                config.pricing_policy(),
            )
        };

        let mut first = open();
        let mut out = Vec::new();
        serve(
            &mut first,
            &config,
            Cursor::new("{\"command\":\"add_to_cart\",\"name\":\"Lassi\",\"price\":3.75}\n"),
            &mut out,
        )
        .unwrap();

        let second = open();
        assert_eq!(second.cart().total_quantity(), 1);
        assert_eq!(second.cart().items()[0].name, "Lassi");
    }

    #[test]
    fn test_open_slot_memory_flag() {
        let mut slot = open_slot(&ConfigState::default(), true);
        slot.write("k", "v").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_open_slot_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            data_dir: Some(dir.path().to_path_buf()),
            ..ConfigState::default()
        };

        let mut slot = open_slot(&config, false);
        slot.write("paradise_cart_v1", "[]").unwrap();
        assert!(dir.path().join("paradise_cart_v1.json").exists());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["paradise-storefront", "--config", "/etc/paradise.toml", "--memory"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/paradise.toml")));
        assert!(cli.memory);
    }
}
