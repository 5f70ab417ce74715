//! egui Native Desktop App Module
//!
//! Desktop front end for the hosted user directory: sign-in and sign-up
//! forms plus an admin screen that lists, creates, edits and removes user
//! records.
//!
//! # Architecture
//!
//! - **`config`** - Environment-driven configuration
//! - **`gateway`** - Remote data gateway (hosted auth + document store, or in-memory)
//! - **`pending`** - Background calls polled once per frame
//! - **`forms`** - Form controller with validation and submit lifecycle
//! - **`users`** - User list / CRUD screen controller
//! - **`notify`** - Transient toast notifications
//! - **`state`** - Central application state
//! - **`views`** - egui rendering
//! - **`theme`** - Colors and styles
//!
//! Network calls never run on the UI thread. Each one is handed to a worker
//! thread and its result is picked up by `AppState::check_pending`.

pub mod config;
pub mod forms;
pub mod gateway;
pub mod notify;
pub mod pending;
pub mod state;
pub mod theme;
pub mod types;
pub mod users;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use types::{AppView, UserInfo};
