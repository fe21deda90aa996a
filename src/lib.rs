//! Ngọc Hạp Thông Thư - AI almanac consultation for a calendar date.
//!
//! A desktop application that lets the user pick a Gregorian date and ask
//! a remote AI service for a Ngọc Hạp Thông Thư reading: calendar
//! conversion, Tiết khí and Trực, an analysis table of auspicious and
//! inauspicious stars, recommended activities and the day's golden hours,
//! rendered as rich markdown.
//!
//! # Architecture Overview
//!
//! - **UI Layer** ([`app::hapui`]): egui-based interface — the
//!   consultation page plus help and log windows
//! - **Remote Query Client** ([`app::reading_client`]): prompt building
//!   and the single HTTP call to the reading service
//!
//! The query lifecycle is a four-state machine (idle, loading, succeeded,
//! failed) owned by [`app::hapui::reading_page::ReadingPage`]; stale
//! responses from superseded requests are discarded by generation counter.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::HapApp;
