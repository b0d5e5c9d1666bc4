//! Redis Provider Module
//!
//! [`CacheProvider`] backed by a remote Redis server.
//!
//! ## Behaviour
//!
//! - The connection is established lazily by the first operation. Every
//!   operation issued before it resolves waits on the same attempt, and the
//!   outcome (including failure) is kept for the lifetime of the provider.
//! - Values travel as JSON text.
//! - `set` sends SET then EXPIRE as two requests. If the process dies in
//!   between, the key persists without expiry.
//! - `flush` sends KEYS `<prefix>*` then one DEL for the matches, skipping
//!   the DEL when nothing matched. Keys written between the two requests
//!   survive.
//! - Operations on the same key are not ordered by the provider; concurrent
//!   `set` and `delete` race at the server.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ::redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisResult};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::CacheProvider;
use crate::diagnostics::DiagnosticSink;
use crate::error::{CacheError, Result};

/// Largest TTL accepted for EXPIRE. The server converts seconds to a
/// millisecond deadline and rejects anything that overflows it.
const MAX_EXPIRE_SECS: u64 = i64::MAX as u64 / 1000 / 2;

const INVALID_OPTIONS: &str = "Please provide connection options with host port and (if needed) password to connect to a Redis server";

// == Connection Options ==
/// Connection parameters for [`RedisProvider`].
///
/// All three are required; `password` may be empty, which skips AUTH.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub password: Option<String>,
}

impl ConnectionOptions {
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            password: Some(password.into()),
        }
    }
}

// == Redis Provider ==
/// Redis-backed cache provider owning a single multiplexed connection.
pub struct RedisProvider {
    client: Client,
    address: String,
    password: String,
    conn: OnceCell<std::result::Result<MultiplexedConnection, String>>,
    closed: AtomicBool,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl std::fmt::Debug for RedisProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisProvider")
            .field("address", &self.address)
            .field("connected", &self.is_connected())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

impl RedisProvider {
    // == Constructor ==
    /// Validates `options` and prepares the client. No network traffic
    /// happens until the first operation.
    pub fn new(options: ConnectionOptions) -> Result<Self> {
        let (host, port, password) = match options {
            ConnectionOptions {
                host: Some(host),
                port: Some(port),
                password: Some(password),
            } if !host.is_empty() && port != 0 => (host, port, password),
            _ => return Err(CacheError::Configuration(INVALID_OPTIONS.to_string())),
        };

        let address = host_port(&host, port);
        let client = Client::open(format!("redis://{}/", address))
            .map_err(|e| CacheError::Configuration(format!("Invalid Redis address: {}", e)))?;

        Ok(Self {
            client,
            address,
            password,
            conn: OnceCell::new(),
            closed: AtomicBool::new(false),
            diagnostics: None,
        })
    }

    /// Attaches a sink notified of every failed operation.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// `host:port` of the server.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// True once a connection is established and `close` was not called.
    pub fn is_connected(&self) -> bool {
        !self.closed.load(Ordering::Acquire) && matches!(self.conn.get(), Some(Ok(_)))
    }

    // == Close ==
    /// Closes the connection. Later operations fail with
    /// [`CacheError::Connection`]. Errors while closing go to the diagnostic
    /// sink only.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(Ok(conn)) = self.conn.get() {
            let mut conn = conn.clone();
            let result: RedisResult<()> = ::redis::cmd("QUIT").query_async(&mut conn).await;
            if let Err(e) = result {
                self.report("close", "", &CacheError::Connection(e.to_string()));
            }
        }
        info!(address = %self.address, "redis connection closed");
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Connection("connection closed".to_string()));
        }

        match self.conn.get_or_init(|| self.establish()).await {
            Ok(conn) => Ok(conn.clone()),
            Err(message) => Err(CacheError::Connection(message.clone())),
        }
    }

    /// Connects and authenticates as one step.
    async fn establish(&self) -> std::result::Result<MultiplexedConnection, String> {
        debug!(address = %self.address, "connecting to redis");

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("failed to connect to {}: {}", self.address, e))?;

        if !self.password.is_empty() {
            let auth: RedisResult<()> = ::redis::cmd("AUTH")
                .arg(&self.password)
                .query_async(&mut conn)
                .await;
            auth.map_err(|e| format!("authentication with {} failed: {}", self.address, e))?;
        }

        info!(address = %self.address, "redis connection established");
        Ok(conn)
    }

    fn report(&self, op: &'static str, key: &str, err: &CacheError) {
        if let Some(sink) = &self.diagnostics {
            let message = err.to_string();
            sink.error(&format!("nscache::redis::{}", op), &[message.as_str(), key]);
        }
    }

    /// Runs `fut`, notifying the diagnostic sink if it fails. The error is
    /// returned unchanged.
    async fn observed<T, F>(&self, op: &'static str, key: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let result = fut.await;
        if let Err(err) = &result {
            self.report(op, key, err);
        }
        result
    }

    async fn store(&self, key: &str, value: &Value, ttl: u64) -> Result<()> {
        let expire = expire_seconds(key, ttl)?;
        let text = serde_json::to_string(value)?;
        let mut conn = self.connection().await?;

        let _: () = conn
            .set(key, text)
            .await
            .map_err(|e| CacheError::operation("SET", key, e))?;

        if let Some(seconds) = expire {
            let _: () = conn
                .expire(key, seconds)
                .await
                .map_err(|e| CacheError::operation("EXPIRE", key, e))?;
        }
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.connection().await?;
        let text: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::operation("GET", key, e))?;

        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(key)
            .await
            .map_err(|e| CacheError::operation("DEL", key, e))?;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<u64> {
        let mut conn = self.connection().await?;
        let pattern = scan_pattern(prefix);

        let keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| CacheError::operation("KEYS", &pattern, e))?;

        if keys.is_empty() {
            debug!(pattern = %pattern, "flush matched no keys");
            return Ok(0);
        }

        let removed: u64 = conn
            .del(&keys)
            .await
            .map_err(|e| CacheError::operation("DEL", &pattern, e))?;

        debug!(pattern = %pattern, matched = keys.len(), removed, "flush complete");
        Ok(removed)
    }
}

#[async_trait]
impl CacheProvider for RedisProvider {
    async fn set(&self, key: &str, value: &Value, ttl: u64) -> Result<()> {
        self.observed("set", key, self.store(key, value, ttl)).await
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.observed("get", key, self.fetch(key)).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.observed("delete", key, self.remove(key)).await
    }

    async fn flush(&self, prefix: &str) -> Result<u64> {
        self.observed("flush", prefix, self.remove_prefix(prefix)).await
    }

    fn backend_type(&self) -> &'static str {
        "redis"
    }
}

/// Converts a TTL to EXPIRE seconds, `None` for zero. Out-of-range TTLs
/// are rejected before SET so no key is left without its expiry.
fn expire_seconds(key: &str, ttl: u64) -> Result<Option<i64>> {
    match ttl {
        0 => Ok(None),
        ttl if ttl <= MAX_EXPIRE_SECS => Ok(Some(ttl as i64)),
        ttl => Err(CacheError::operation(
            "EXPIRE",
            key,
            format!("ttl {} exceeds maximum of {} seconds", ttl, MAX_EXPIRE_SECS),
        )),
    }
}

/// Formats `host:port`, bracketing IPv6 literals.
fn host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Builds the KEYS pattern matching every key that starts with the literal
/// `prefix`.
fn scan_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}
