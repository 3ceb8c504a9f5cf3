//! # Repository Module
//!
//! Database repository implementations for Stockbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller (form layer, seed tool)                                        │
//! │       │                                                                 │
//! │       │  manager.products().search_by_name("cup")                      │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, product)                                            │
//! │  ├── list_all(&self)                                                   │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── search_by_name(&self, fragment)                                   │
//! │  ├── update(&self, product)                                            │
//! │  ├── delete(&self, id)                                                 │
//! │  └── list_categories(&self)                                            │
//! │       │                                                                 │
//! │       │  ConnectionManager::acquire() → SQL                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Store failures never escape: logged, then flattened to a benign     │
//! │    result the caller can always consume                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
