//! # stockbook-db: Persistence Layer for Stockbook
//!
//! This crate provides database access for the Stockbook product catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Data Flow                               │
//! │                                                                         │
//! │  Catalog UI (product form, search box, category picker)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌────────────────┐    ┌────────────┐  │   │
//! │  │   │  Connection    │    │  Repositories  │    │   Schema   │  │   │
//! │  │   │ (connection.rs)│    │  (product.rs)  │    │(schema.rs) │  │   │
//! │  │   │                │    │                │    │            │  │   │
//! │  │   │ Manager        │◄───│ ProductRepo    │    │ products   │  │   │
//! │  │   │ State tracking │    │ benign failure │    │ DDL        │  │   │
//! │  │   │ Reconnect      │    │ policy         │    │            │  │   │
//! │  │   └────────────────┘    └────────────────┘    └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/stockbook/stockbook.db   (or :memory:)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - Connection manager, lifecycle state, configuration
//! - [`schema`] - Catalog table bootstrap
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{ConnectionManager, DbConfig};
//!
//! // Open (or create) the catalog store
//! let manager = ConnectionManager::new(DbConfig::new("path/to/stockbook.db"));
//! manager.initialize().await?;
//!
//! // Use the repository; failures surface as benign results
//! let repo = manager.products();
//! let office = repo.search_by_name("pen").await;
//!
//! manager.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use connection::{ConnectionManager, ConnectionState, DbConfig};
pub use error::{DbError, DbResult};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
