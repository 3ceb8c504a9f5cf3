//! # Connection Manager
//!
//! Lifecycle of the shared SQLite connection handle.
//!
//! ## Connection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Connection Manager States                           │
//! │                                                                         │
//! │  ┌────────────┐    acquire()    ┌────────────┐                         │
//! │  │Disconnected│ ──────────────► │ Connecting │                         │
//! │  └────────────┘                 └─────┬──────┘                         │
//! │        ▲                              │                                 │
//! │        │                    success   │   failure                       │
//! │        │                        ┌─────┴─────┐                          │
//! │        │                        ▼           ▼                           │
//! │        │              ┌────────────┐   back to                          │
//! │        │              │ Connected  │   Disconnected (logged)            │
//! │        │              └─────┬──────┘                                    │
//! │        │                    │                                           │
//! │        │                 close() / handle found closed                  │
//! │        │                    │                                           │
//! │        └────────────────────┘                                           │
//! │                                                                         │
//! │  The handle is created lazily on first acquire() and recreated         │
//! │  whenever a later acquire() finds it closed. There is NO retry         │
//! │  policy: a failed open is reported once and the next call tries        │
//! │  again from scratch.                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Handle Access
//! The `Option<SqlitePool>` lives behind one `tokio::sync::Mutex`. Every
//! check-then-reuse and check-then-reopen runs inside that critical
//! section, so two tasks can never race to replace a stale handle. Callers
//! get a cheap pool clone and run their statements outside the lock.
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use directories::ProjectDirs;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// The fixed connection parameters of the store: where the database file
/// lives and how the pool behaves. Analog of a server URL plus credentials,
/// collapsed to a path for an embedded store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/stockbook.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local desktop app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a pooled connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let manager = ConnectionManager::new(DbConfig::in_memory());
    /// manager.initialize().await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// Resolves the default database file location.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.stockbook.stockbook/stockbook.db`
    /// - **Windows**: `%APPDATA%\stockbook\stockbook\data\stockbook.db`
    /// - **Linux**: `~/.local/share/stockbook/stockbook.db`
    ///
    /// ## Development Override
    /// Set the `STOCKBOOK_DB_PATH` environment variable to use a custom path.
    pub fn default_database_path() -> DbResult<PathBuf> {
        if let Ok(path) = std::env::var("STOCKBOOK_DB_PATH") {
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "stockbook", "stockbook").ok_or_else(|| {
            DbError::ConnectionFailed("could not determine app data directory".to_string())
        })?;

        let data_dir = proj_dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        Ok(data_dir.join("stockbook.db"))
    }
}

// =============================================================================
// Connection State
// =============================================================================

/// Observable state of the shared connection handle.
///
/// Reconnection is an explicit transition, not a silent getter side effect:
/// tests close the handle and watch `Disconnected → Connecting → Connected`
/// play out on the next acquire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No usable handle.
    Disconnected,
    /// A handle is being opened.
    Connecting,
    /// Handle open and ready.
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
        }
    }
}

// =============================================================================
// Connection Manager
// =============================================================================

/// Owns the shared connection handle and its lifecycle.
///
/// The manager is a cheap `Clone` over shared state: every clone sees the
/// same handle and the same observable state. Repositories keep a clone and
/// call [`acquire`](ConnectionManager::acquire) per operation; nothing else
/// in the process opens or closes connections.
///
/// ## Usage
/// ```rust,ignore
/// let manager = ConnectionManager::new(DbConfig::new(db_path));
/// manager.initialize().await?;
///
/// let repo = manager.products();
/// let all = repo.list_all().await;
///
/// manager.close().await;
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    inner: Arc<ManagerInner>,
}

#[derive(Debug)]
struct ManagerInner {
    /// Fixed connection parameters.
    config: DbConfig,

    /// The shared handle. `None` until first acquire and after close.
    pool: Mutex<Option<SqlitePool>>,

    /// Observable connection state.
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    /// Creates a manager without connecting.
    ///
    /// The handle is opened lazily by the first
    /// [`acquire`](ConnectionManager::acquire) or
    /// [`initialize`](ConnectionManager::initialize) call.
    pub fn new(config: DbConfig) -> Self {
        ConnectionManager {
            inner: Arc::new(ManagerInner {
                config,
                pool: Mutex::new(None),
                state: RwLock::new(ConnectionState::Disconnected),
            }),
        }
    }

    /// Returns the configuration this manager was built with.
    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    /// Connects and ensures the products table exists.
    ///
    /// ## What This Does
    /// 1. Opens the shared handle (creating the database file if missing)
    /// 2. Issues the `CREATE TABLE IF NOT EXISTS` bootstrap DDL
    ///
    /// Idempotent: safe to call at every startup. On failure the error is
    /// logged and returned; the process is expected to continue, with every
    /// repository operation reporting its benign result until the store
    /// becomes reachable.
    pub async fn initialize(&self) -> DbResult<()> {
        info!(
            path = %self.inner.config.database_path.display(),
            "Initializing product store"
        );

        let pool = match self.acquire().await {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "Store initialization failed");
                return Err(e);
            }
        };

        if let Err(e) = schema::ensure_schema(&pool).await {
            error!(error = %e, "Schema bootstrap failed");
            return Err(e);
        }

        info!("Product store ready");
        Ok(())
    }

    /// Returns the shared connection handle, opening it if needed.
    ///
    /// ## Behavior
    /// - Handle present and open: returns a clone of it
    /// - Handle absent or found closed: opens a new one with the fixed
    ///   configuration, moving through `Connecting` to `Connected`
    /// - Open fails: state returns to `Disconnected` and the error is
    ///   reported to the caller
    ///
    /// Never blocks indefinitely; a saturated pool fails the acquire after
    /// `connect_timeout`.
    pub async fn acquire(&self) -> DbResult<SqlitePool> {
        let mut guard = self.inner.pool.lock().await;

        if let Some(pool) = guard.as_ref() {
            if !pool.is_closed() {
                return Ok(pool.clone());
            }
            debug!("Connection handle found closed, reopening");
            *guard = None;
        }

        *self.inner.state.write().await = ConnectionState::Connecting;

        match self.open_pool().await {
            Ok(pool) => {
                *guard = Some(pool.clone());
                *self.inner.state.write().await = ConnectionState::Connected;
                info!("Connected to product store");
                Ok(pool)
            }
            Err(e) => {
                *self.inner.state.write().await = ConnectionState::Disconnected;
                warn!(error = %e, "Failed to open product store");
                Err(e)
            }
        }
    }

    /// Builds a new pool from the fixed configuration.
    async fn open_pool(&self) -> DbResult<SqlitePool> {
        let config = &self.inner.config;

        let connect_options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            // WAL mode: readers don't block writers
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power loss
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Create file if it doesn't exist
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            "Connection pool created"
        );

        Ok(pool)
    }

    /// Closes the shared handle if open.
    ///
    /// No-op when already closed. The next
    /// [`acquire`](ConnectionManager::acquire) reconnects.
    pub async fn close(&self) {
        let mut guard = self.inner.pool.lock().await;

        if let Some(pool) = guard.take() {
            info!("Closing product store connection");
            pool.close().await;
        }

        *self.inner.state.write().await = ConnectionState::Disconnected;
    }

    /// Returns the current connection state.
    pub async fn state(&self) -> ConnectionState {
        *self.inner.state.read().await
    }

    /// Returns true if the last transition left the handle connected.
    pub async fn is_connected(&self) -> bool {
        *self.inner.state.read().await == ConnectionState::Connected
    }

    /// Checks if the store is reachable (can execute queries).
    ///
    /// ## Returns
    /// * `true` - Store is responsive
    /// * `false` - Store is unavailable
    pub async fn health_check(&self) -> bool {
        match self.acquire().await {
            Ok(pool) => sqlx::query("SELECT 1").execute(&pool).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = manager.products().list_all().await;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::{Money, Product};

    #[test]
    fn test_connection_state_display() {
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_fresh_manager_starts_disconnected() {
        let manager = ConnectionManager::new(DbConfig::in_memory());

        assert_eq!(manager.state().await, ConnectionState::Disconnected);
        assert!(!manager.is_connected().await);
    }

    #[tokio::test]
    async fn test_initialize_connects_and_is_idempotent() {
        let manager = ConnectionManager::new(DbConfig::in_memory());

        manager.initialize().await.unwrap();
        assert_eq!(manager.state().await, ConnectionState::Connected);

        // Second run is a no-op over the existing schema.
        manager.initialize().await.unwrap();
        assert!(manager.health_check().await);
    }

    #[tokio::test]
    async fn test_close_disconnects_and_tolerates_repeats() {
        let manager = ConnectionManager::new(DbConfig::in_memory());
        manager.initialize().await.unwrap();

        manager.close().await;
        assert_eq!(manager.state().await, ConnectionState::Disconnected);

        manager.close().await;
        assert_eq!(manager.state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_acquire_reopens_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("stockbook.db"));
        let manager = ConnectionManager::new(config);
        manager.initialize().await.unwrap();

        let repo = manager.products();
        let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
        assert!(repo.insert(&pen).await);

        manager.close().await;
        assert!(!manager.is_connected().await);

        // The next operation transparently reconnects; data survives in
        // the file-backed store.
        let all = repo.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Pen");
        assert!(manager.is_connected().await);
    }

    #[tokio::test]
    async fn test_initialize_failure_leaves_manager_disconnected() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-directory");
        std::fs::write(&blocker, b"plain file").unwrap();

        let config = DbConfig::new(blocker.join("stockbook.db"))
            .connect_timeout(Duration::from_secs(1));
        let manager = ConnectionManager::new(config);

        assert!(manager.initialize().await.is_err());
        assert_eq!(manager.state().await, ConnectionState::Disconnected);
        assert!(!manager.health_check().await);
    }

    #[tokio::test]
    async fn test_in_memory_store_answers_health_check() {
        let manager = ConnectionManager::new(DbConfig::in_memory());
        manager.initialize().await.unwrap();

        assert!(manager.health_check().await);
    }
}
