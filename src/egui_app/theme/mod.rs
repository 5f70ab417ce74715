//! Theme Module
//!
//! Color scheme and frame helpers for the admin app.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     // Form content
//! });
//! ```

pub mod colors;
pub mod styles;
