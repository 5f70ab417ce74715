//! Color Constants
//!
//! Indigo/purple palette for the sign-in screens and the admin list.

use eframe::egui::Color32;

/// Dark background for main areas
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x1B, 0x2E);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x2A, 0x25, 0x45);

/// Card / modal background
pub const CARD_BG: Color32 = Color32::from_rgb(0xFA, 0xFA, 0xFC);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xD1, 0xD5, 0xDB);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF3, 0xF4, 0xF6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

/// Accent color for primary buttons - Indigo
pub const ACCENT: Color32 = Color32::from_rgb(0x63, 0x66, 0xF1);

/// Accent hover - Purple
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x93, 0x33, 0xEA);

/// Destructive buttons
pub const DANGER: Color32 = Color32::from_rgb(0xDC, 0x26, 0x26);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x16, 0xA3, 0x4A);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);
