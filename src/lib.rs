//! Gazi Admin - Main Library
//!
//! Desktop admin client for a hosted user directory. Users sign in or sign
//! up against the hosted auth service, then manage the records of a single
//! document collection.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Credentials, sessions and user records
//!   - Form validation schemas
//!   - Configuration and error types
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Remote data gateway
//!   - Form and list screen controllers
//!   - Views and theme
//!
//! # Thread Safety
//!
//! - **Gateway**: `Send + Sync`, shared as `Arc<dyn Gateway>`
//! - **Native**: egui is single-threaded immediate mode GUI; network calls
//!   run on worker threads and report back over channels
//!
//! # Error Handling
//!
//! - `GatewayError` for remote calls (auth failure, missing record, transient)
//! - `SharedError` for payloads that fail to decode
//! - `ConfigError` for invalid configuration

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
