//! nl-neigh-delete
//!
//! Deletes kernel neighbour entries that match the given options. Output for
//! the user goes to stdout; diagnostics go to stderr through `tracing` and are
//! controlled with `NL_NEIGH_DELETE_LOG` (default `warn`).

use nl_neigh_delete::{
    DeletionExecutor, FilterBuilder, Invocation, NeighDeleteError, NetlinkSocket, Result, config,
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "NL_NEIGH_DELETE_LOG";

/// Log filter used when the environment does not set one
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    // Help, version and usage errors are printed and exit here
    let invocation = match config::parse() {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };

    if let Err(e) = init_logging() {
        eprintln!("Warning: {}", e);
    }

    match run(invocation) {
        Ok(deleted) => {
            debug!(deleted, "nl-neigh-delete: finished");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e, &mut io::stderr()),
    }
}

/// Print the single user-facing error line and map the error to an exit status
fn report_failure<W: Write>(e: &NeighDeleteError, out: &mut W) -> ExitCode {
    debug!(error = %e, code = e.code(), "nl-neigh-delete: aborting");
    let _ = writeln!(out, "Error: {}", e);
    ExitCode::from(u8::try_from(e.code()).unwrap_or(u8::MAX))
}

/// Initialize structured logging on stderr
fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        NeighDeleteError::Io(io::Error::other(format!("Failed to set logger: {}", e)))
    })?;

    Ok(())
}

/// Connect, snapshot the caches, build the filter and run one deletion pass
fn run(invocation: Invocation) -> Result<usize> {
    let mut socket = NetlinkSocket::connect()?;
    let links = socket.alloc_link_cache()?;
    let neighbours = socket.alloc_neigh_cache(&links)?;

    // Any bad token aborts here, before a single entry is looked at
    let filter = FilterBuilder::new(&links).build(invocation.filter_tokens())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    DeletionExecutor::new(&mut socket, invocation.config, stdin.lock(), stdout.lock())
        .run(&neighbours, &filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neigh_types::ParseError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_constants() {
        assert_eq!(LOG_ENV, "NL_NEIGH_DELETE_LOG");
        assert_eq!(DEFAULT_LOG_FILTER, "warn");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    /// Shared in-memory sink for captured log output
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failure_reported_once_at_default_level() {
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with_writer(move || writer.clone())
            .finish();

        let err = NeighDeleteError::from(ParseError::UnknownDevice("nosuchdev".to_string()));
        let mut out = Vec::new();
        let code = tracing::subscriber::with_default(subscriber, || report_failure(&err, &mut out));

        assert_eq!(code, ExitCode::from(libc::ENODEV as u8));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Link \"nosuchdev\" does not exist\n"
        );
        assert!(logs.0.lock().unwrap().is_empty());
    }
}
