//! # Bookvault Architecture
//!
//! Bookvault is a **UI-agnostic reading tracker library**: book records, logged
//! reading sessions and collection stats, kept in a local JSON store. The
//! `bookvault` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (3 → rec_0003)                         │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! │  - Surfaces unsaved changes as warnings                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: ids, migration, progress invariant          │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records and Progress
//!
//! Every [`model::Record`] tracks `pagesRead` against `pages` and keeps a
//! newest-first history of [`model::LogEntry`] sessions. The store guarantees
//! `0 <= pagesRead <= pages` for every change it makes; logging past the end
//! of a book is rejected, not clamped.
//!
//! Data written by older versions (no `pagesRead`, no `readHistory`) is
//! migrated when loaded or imported.
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade. The binary installs
//! `env_logger` (default level `warn`, `-v` for debug, `RUST_LOG` overrides).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: The record store and its backends
//! - [`model`]: Core data types (`Record`, `LogEntry`, `Stats`)
//! - [`search`]: Filtering, highlighting and sorting
//! - [`settings`]: User preferences
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod error;
pub mod model;
pub mod search;
pub mod settings;
pub mod store;
