//! Structured error events for typed errors.
//!
//! Run with `TYERS_TRACING=categories,sources` to see the optional fields.

use tracing::Level;
use tyers::{Error, ResultExt, Sentinel, errorf};
use tyers_tracing::TraceErrExt;

static STORAGE: Sentinel = Sentinel::new("storage error");

#[derive(Debug, thiserror::Error)]
#[error("connection reset by peer")]
struct ConnectionReset;

fn fetch_row(id: u64) -> tyers::Result<String> {
    let missing = tyers::new(&STORAGE, "row missing");
    if id == 0 {
        return Err(errorf!(&missing, "row {} does not exist", id));
    }
    Err(ConnectionReset).typed(&STORAGE)
}

fn load_user(id: u64) -> tyers::Result<String> {
    fetch_row(id).map_err(|e| errorf!(None, "load user {}: {}", id, wrap(e)))
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let _ = load_user(0).trace_err();
    let _ = load_user(7).trace_err_at(Level::WARN);

    let retryable = Error::msg("retryable");
    let _ = load_user(7)
        .map_err(|e| e.with_category(&retryable))
        .trace_err_at(Level::INFO);
}
