//! Main consultation page.
//!
//! Owns the selected date and the lifecycle of the current query, and
//! renders one of four mutually exclusive states: idle, loading, failed,
//! or a finished reading.

#![warn(clippy::all, rust_2018_idioms)]

use crate::app::reading_client::{Reading, ReadingClient, ReadingError};
use chrono::NaiveDate;
use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};
use egui_extras::DatePickerButton;
use std::sync::mpsc;
use std::sync::Arc;
use tracing::debug;

/// Amber accent used for headings and the submit button, matching the
/// application's dark mystic palette.
const ACCENT: Color32 = Color32::from_rgb(251, 191, 36);

/// Lifecycle of the current query. Exactly one variant is active; a new
/// submit replaces whatever was live before its outcome is known.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingState {
    Idle,
    Loading,
    Succeeded(Reading),
    Failed(String),
}

/// Outcome of one background fetch, tagged with the generation of the
/// submit that started it.
type FetchOutcome = (u64, Result<Reading, ReadingError>);

pub struct ReadingPage {
    selected_date: Option<NaiveDate>,
    state: ReadingState,

    // Generation of the most recent submit. Completions carrying an older
    // generation are discarded in poll_results.
    generation: u64,

    client: Arc<ReadingClient>,
    markdown_cache: CommonMarkCache,

    // Channel for receiving fetch outcomes from worker threads
    result_receiver: mpsc::Receiver<FetchOutcome>,
    result_sender: mpsc::Sender<FetchOutcome>,
}

impl Default for ReadingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingPage {
    pub fn new() -> Self {
        let (result_sender, result_receiver) = mpsc::channel();

        Self {
            selected_date: Some(chrono::Local::now().date_naive()),
            state: ReadingState::Idle,
            generation: 0,
            client: Arc::new(ReadingClient::new()),
            markdown_cache: CommonMarkCache::default(),
            result_receiver,
            result_sender,
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Replace the selected date wholesale. Never touches the query state.
    pub fn set_selected_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    pub fn state(&self) -> &ReadingState {
        &self.state
    }

    /// Start a consultation for the selected date against the real
    /// reading service. No-op when no date is selected.
    pub fn submit(&mut self) {
        let client = Arc::clone(&self.client);
        self.submit_with(move |date| client.fetch_reading(date));
    }

    /// Start a consultation using `fetch` to resolve the reading. This is
    /// the seam [`submit`](Self::submit) and the state-machine tests share:
    /// it moves to `Loading` synchronously and runs `fetch` on a worker
    /// thread, tagging the outcome with this submit's generation.
    pub fn submit_with<F>(&mut self, fetch: F)
    where
        F: FnOnce(NaiveDate) -> Result<Reading, ReadingError> + Send + 'static,
    {
        let Some(date) = self.selected_date else {
            return;
        };

        self.generation += 1;
        let generation = self.generation;
        self.state = ReadingState::Loading;

        let sender = self.result_sender.clone();

        // egui runs on a blocking thread; the fetch gets its own thread
        // and reports back through the channel.
        std::thread::spawn(move || {
            let outcome = fetch(date);
            let _ = sender.send((generation, outcome));
        });
    }

    /// Drain fetch outcomes from worker threads. Only an outcome from the
    /// most recent submit may update the state; anything older lost the
    /// race to a newer submit.
    pub fn poll_results(&mut self) {
        while let Ok((generation, outcome)) = self.result_receiver.try_recv() {
            if generation != self.generation {
                debug!(
                    "Discarding stale reading outcome (generation {} < {})",
                    generation, self.generation
                );
                continue;
            }

            self.state = match outcome {
                Ok(reading) => ReadingState::Succeeded(reading),
                Err(e) => ReadingState::Failed(e.to_string()),
            };
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        self.poll_results();

        // Keep repainting while a fetch is outstanding so the spinner
        // animates and the outcome is picked up promptly.
        if matches!(self.state, ReadingState::Loading) {
            ui.ctx().request_repaint();
        }

        self.render_header(ui);
        ui.add_space(20.0);
        self.render_input_card(ui);
        ui.add_space(16.0);

        let Self {
            state,
            markdown_cache,
            ..
        } = self;

        match state {
            ReadingState::Idle => {}
            ReadingState::Loading => render_loading(ui),
            ReadingState::Failed(message) => render_error(ui, message),
            ReadingState::Succeeded(reading) => render_result(ui, reading, markdown_cache),
        }
    }

    fn render_header(&self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(RichText::new("🧭").size(48.0).color(ACCENT));
            ui.label(
                RichText::new("Ngọc Hạp Thông Thư")
                    .heading()
                    .size(34.0)
                    .strong(),
            );
            ui.label(
                RichText::new("Vấn sự thiên cơ - Luận giải ngày lành tháng tốt")
                    .italics()
                    .weak(),
            );
        });
    }

    fn render_input_card(&mut self, ui: &mut Ui) {
        let loading = matches!(self.state, ReadingState::Loading);
        let mut submit_clicked = false;

        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.label(RichText::new("📖 Chọn Ngày Khởi Sự").strong().color(ACCENT));
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.add_space(ui.available_width() / 2.0 - 160.0);

                    // The picker edits a local copy; the page only takes
                    // the new value on an actual change.
                    let mut date = self
                        .selected_date
                        .unwrap_or_else(|| chrono::Local::now().date_naive());
                    let response = ui.add(
                        DatePickerButton::new(&mut date)
                            .id_salt("ngay_khoi_su")
                            .format("%d/%m/%Y")
                            .highlight_weekends(false),
                    );
                    if response.changed() {
                        self.set_selected_date(Some(date));
                    }

                    ui.add_space(10.0);

                    let label = if loading {
                        "Đang Luận Giải..."
                    } else {
                        "🔥 Khai Mở Thiên Cơ"
                    };
                    let enabled = self.selected_date.is_some() && !loading;
                    let button =
                        egui::Button::new(RichText::new(label).strong()).fill(ACCENT.gamma_multiply(0.25));
                    if ui.add_enabled(enabled, button).clicked() {
                        submit_clicked = true;
                    }
                });
                ui.add_space(6.0);
            });
        });

        if submit_clicked {
            self.submit();
        }
    }
}

fn render_loading(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.add_space(12.0);
        ui.label(
            RichText::new("Đang tra cứu tinh tú, vui lòng đợi...")
                .color(ACCENT)
                .size(16.0),
        );
    });
}

fn render_error(ui: &mut Ui, message: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new("⚠ Thiên cơ bất khả lộ")
                    .strong()
                    .color(Color32::from_rgb(220, 80, 80)),
            );
            ui.add_space(4.0);
            ui.label(message);
        });
    });
}

fn render_result(ui: &mut Ui, reading: &Reading, cache: &mut CommonMarkCache) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("🌟 Lời Giải Từ Bậc Thầy Phong Thủy")
                    .strong()
                    .color(ACCENT),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("Model: {}", reading.model_id))
                        .small()
                        .background_color(ACCENT.gamma_multiply(0.3)),
                );
            });
        });
        ui.separator();

        if looks_like_markdown(&reading.text) {
            CommonMarkViewer::new().show(ui, cache, &reading.text);
        } else {
            ui.label(&reading.text);
        }

        ui.add_space(16.0);
        ui.separator();
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("\"Đức năng thắng số. Hãy làm việc thiện để tích phúc đức.\"")
                    .italics()
                    .weak(),
            );
        });
    });
}

/// Decide whether a reading should go through the markdown renderer or be
/// shown as plain text.
pub fn looks_like_markdown(content: &str) -> bool {
    let patterns = [
        "```",    // Code blocks
        "\n# ",   // H1 header
        "\n## ",  // H2 header
        "\n### ", // H3 header
        "### ",   // H3 header at start of reply
        "\n* ",   // Unordered list
        "\n- ",   // Unordered list
        "\n1. ",  // Ordered list
        "- [x]",  // Checklist, checked
        "- [ ]",  // Checklist, unchecked
        "**",     // Bold
        "| ",     // Table row
        "](http", // Links
    ];

    patterns.iter().any(|p| content.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_date_is_today() {
        let page = ReadingPage::new();
        assert_eq!(
            page.selected_date(),
            Some(chrono::Local::now().date_naive())
        );
        assert_eq!(*page.state(), ReadingState::Idle);
    }

    #[test]
    fn markdown_heuristic_accepts_gfm_tables_and_checklists() {
        assert!(looks_like_markdown("| Loại Sao | Tên Sao |\n| :-- | :-- |"));
        assert!(looks_like_markdown("- [x] Nên làm\n- [ ] Nên kiêng"));
        assert!(looks_like_markdown("### Thông tin ngày"));
    }

    #[test]
    fn markdown_heuristic_rejects_plain_text() {
        assert!(!looks_like_markdown("Hôm nay là một ngày bình thường."));
    }
}
