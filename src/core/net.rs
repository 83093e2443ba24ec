// src/core/net.rs
//
// Blocking HTTP(S) GET. The workbook lives behind TLS, so plain TCP is out.

use std::io::Read;
use std::time::Duration;

use crate::config::consts::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout_read(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}

/// GET `url` with query parameters and return the body bytes.
/// Non-2xx statuses and transport failures come back as `Error::Fetch`.
pub fn http_get_bytes(agent: &ureq::Agent, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut req = agent.get(url);
    for (k, v) in query {
        req = req.query(k, v);
    }
    let resp = req.call()?;
    let status = resp.status();
    if !(200..=299).contains(&status) {
        return Err(Error::Fetch(format!("HTTP {} from {}", status, url)));
    }

    let mut buf = Vec::new();
    resp.into_reader()
        .read_to_end(&mut buf)
        .map_err(|e| Error::Fetch(format!("reading body from {url}: {e}")))?;
    Ok(buf)
}

pub fn http_get(agent: &ureq::Agent, url: &str, query: &[(&str, &str)]) -> Result<String> {
    let bytes = http_get_bytes(agent, url, query)?;
    String::from_utf8(bytes).map_err(|_| Error::Fetch(format!("non UTF-8 body from {url}")))
}
