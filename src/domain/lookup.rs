//! Registry lookup backends
//!
//! A lookup only fetches text for a domain. Deciding what that text means is
//! [`crate::domain::probe::classify_output`]'s job.

use crate::error::{Result, ScoutError};
use crate::types::CanonicalDomain;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use super::WhoisLookup;

/// Runs the system `whois` executable
#[derive(Debug, Clone)]
pub struct CommandWhois {
    program: String,
    timeout: Duration,
}

impl CommandWhois {
    pub fn new() -> Self {
        Self::with_program("whois")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandWhois {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WhoisLookup for CommandWhois {
    async fn lookup(&self, domain: &CanonicalDomain) -> Result<String> {
        let output = timeout(
            self.timeout,
            tokio::process::Command::new(&self.program)
                .arg(domain.as_str())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| ScoutError::timeout(format!("{} {}", self.program, domain), self.timeout.as_secs()))?
        .map_err(|e| {
            ScoutError::lookup(
                domain.as_str(),
                format!("failed to run {}: {}", self.program, e),
                Some("command".to_string()),
            )
        })?;

        // Exit status is ignored: many whois clients exit non-zero for
        // unregistered names while still printing a usable answer.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn method_name(&self) -> &'static str {
        "command"
    }
}

/// WHOIS over TCP/43 (no external binary required)
#[cfg(feature = "whois")]
#[derive(Debug, Clone)]
pub struct TcpWhois {
    timeout: Duration,
}

#[cfg(feature = "whois")]
impl TcpWhois {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Registry WHOIS server for high-usage TLDs; everything else goes to IANA
    pub fn server_for_tld(tld: &str) -> &'static str {
        match tld {
            "com" | "net" => "whois.verisign-grs.com",
            "org" => "whois.pir.org",
            "io" => "whois.nic.io",
            "ai" => "whois.nic.ai",
            "co" => "whois.nic.co",
            "me" => "whois.nic.me",
            "xyz" => "whois.nic.xyz",
            "app" | "dev" => "whois.nic.google",
            _ => "whois.iana.org",
        }
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpStream;

        let secs = self.timeout.as_secs();
        let addr = format!("{}:43", server);
        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| ScoutError::timeout("WHOIS connect", secs))?
            .map_err(|e| ScoutError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone())))?;

        timeout(self.timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| ScoutError::timeout("WHOIS write", secs))?
            .map_err(|e| ScoutError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone())))?;

        let mut buf = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| ScoutError::timeout("WHOIS read", secs))?
            .map_err(|e| ScoutError::network(format!("WHOIS read failed: {}", e), None, Some(addr)))?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(feature = "whois")]
impl Default for TcpWhois {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "whois")]
#[async_trait]
impl WhoisLookup for TcpWhois {
    async fn lookup(&self, domain: &CanonicalDomain) -> Result<String> {
        let server = Self::server_for_tld(domain.tld());
        tracing::debug!(domain = %domain, server = %server, "Querying WHOIS server");
        self.query(server, domain.as_str()).await
    }

    fn method_name(&self) -> &'static str {
        "tcp"
    }
}
