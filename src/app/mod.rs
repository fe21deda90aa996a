//! Core application modules.
//!
//! # Module Organization
//!
//! - [`reading_client`] - Remote query client for the AI reading service
//! - [`hapui`] - Complete user interface implementation
//!
//! # Architecture
//!
//! The application follows a simple layered architecture:
//! - [`reading_client`] turns a calendar date into a prompt, performs the
//!   single network call and normalizes the outcome
//! - [`hapui`] owns the selected date and the query lifecycle, and renders
//!   one of four mutually exclusive visual states

pub mod hapui;
pub mod reading_client;

pub use hapui::app::HapApp;
