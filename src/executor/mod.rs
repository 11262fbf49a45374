//! SQL execution against the ClickHouse property store.
//!
//! The pool holds one pre-built client per configured URL and hands them
//! out round-robin. A request borrows exactly one client, runs its
//! statement and materializes every row before returning; there is no
//! streaming into the pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use clickhouse::Client;
use serde_json::Value;
use tokio::io::AsyncBufReadExt;

use crate::config::ServerConfig;

mod errors;

pub use errors::ExecutionError;

/// A single record returned by the store. Column casing is whatever the
/// generated SQL produced; insertion order is preserved.
pub type RawRow = serde_json::Map<String, Value>;

/// Read-only row source behind the executor seam.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<RawRow>, ExecutionError>;
}

/// Round-robin pool of ClickHouse clients, safe for concurrent acquisition.
pub struct ConnectionPool {
    clients: Vec<Client>,
    round_robin: AtomicUsize,
}

impl ConnectionPool {
    pub fn new(config: &ServerConfig) -> Self {
        let mut clients: Vec<Client> = config
            .clickhouse_url
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| create_client_for_url(url, config))
            .collect();

        if clients.is_empty() {
            clients.push(create_client_for_url(config.clickhouse_url.trim(), config));
        }

        log::info!("ClickHouse pool initialized with {} node(s)", clients.len());

        Self {
            clients,
            round_robin: AtomicUsize::new(0),
        }
    }

    fn client(&self) -> Client {
        let idx = self.round_robin.fetch_add(1, Ordering::Relaxed) % self.clients.len();
        self.clients[idx].clone()
    }

    pub fn node_count(&self) -> usize {
        self.clients.len()
    }
}

fn create_client_for_url(url: &str, config: &ServerConfig) -> Client {
    Client::default()
        .with_url(url)
        .with_user(&config.clickhouse_user)
        .with_password(&config.clickhouse_password)
        .with_database(&config.clickhouse_database)
        .with_option("join_use_nulls", "1") // Return NULL for unmatched LEFT JOIN columns
}

#[async_trait]
impl PropertyStore for ConnectionPool {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<RawRow>, ExecutionError> {
        let client = self.client();

        log::debug!("Executing SQL:\n{}", sql);

        let mut lines = client
            .query(sql)
            .fetch_bytes("JSONEachRow")
            .map_err(|e| {
                // Log full SQL on error for diagnosis (credentials never appear here)
                log::error!("ClickHouse query failed. SQL was:\n{}\nError: {}", sql, e);
                ExecutionError::Store(e.to_string())
            })?
            .lines();

        let mut rows: Vec<RawRow> = vec![];
        while let Some(line) = lines.next_line().await.map_err(|e| {
            log::error!(
                "ClickHouse response read failed. SQL was:\n{}\nError: {}",
                sql,
                e
            );
            ExecutionError::Store(e.to_string())
        })? {
            let value: Value = serde_json::de::from_str(&line)
                .map_err(|e| ExecutionError::Decode(e.to_string()))?;
            match value {
                Value::Object(map) => rows.push(map),
                other => {
                    return Err(ExecutionError::Decode(format!(
                        "expected a JSON object row, got: {}",
                        other
                    )));
                }
            }
        }

        Ok(rows)
    }
}
