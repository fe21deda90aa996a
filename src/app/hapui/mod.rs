//! User interface for the almanac consultation app.
//!
//! - [`app`] - Top-level [`eframe::App`] with theming, menu bar and window
//!   management
//! - [`reading_page`] - The consultation page (date picker, query
//!   lifecycle, reading display)
//! - [`menu`] - Top menu bar
//! - [`help_window`] / [`log_window`] - Auxiliary windows
//! - [`window_focus`] - Trait-based foreground management for the
//!   auxiliary windows

pub mod app;
pub mod help_window;
pub mod log_window;
pub mod menu;
pub mod reading_page;
pub mod window_focus;

pub use app::HapApp;
