//! Liveness probe.
//!
//! Returns a fixed acknowledgment whenever the process can answer HTTP. It does
//! not inspect the request or touch any other part of the service.
//!
//! The body is plain text (`text/plain; charset=utf-8`), not a JSON string:
//! clients get `Test 1 2 3` without quotes and must not parse it as JSON.

use crate::config::PING_RESPONSE;

/// Ping handler.
pub async fn ping() -> &'static str {
    PING_RESPONSE
}
