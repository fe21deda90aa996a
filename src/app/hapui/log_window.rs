#![warn(clippy::all, rust_2018_idioms)]

use super::window_focus::FocusableWindow;
use eframe::egui;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const MAX_LOG_LINES: usize = 1000;
const UPDATE_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ERROR" | "ERRO" => LogLevel::Error,
            "WARN" | "WARNING" => LogLevel::Warn,
            "INFO" => LogLevel::Info,
            "DEBUG" | "DEBG" => LogLevel::Debug,
            "TRACE" | "TRCE" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    fn should_show(&self, filter_level: &LogLevel) -> bool {
        match filter_level {
            LogLevel::Error => matches!(self, LogLevel::Error),
            LogLevel::Warn => matches!(self, LogLevel::Error | LogLevel::Warn),
            LogLevel::Info => matches!(self, LogLevel::Error | LogLevel::Warn | LogLevel::Info),
            LogLevel::Debug => matches!(
                self,
                LogLevel::Error | LogLevel::Warn | LogLevel::Info | LogLevel::Debug
            ),
            LogLevel::Trace => true, // Show all
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn color(&self) -> egui::Color32 {
        match self {
            LogLevel::Error => egui::Color32::from_rgb(220, 80, 80),
            LogLevel::Warn => egui::Color32::from_rgb(220, 170, 60),
            LogLevel::Info => egui::Color32::from_rgb(110, 180, 110),
            LogLevel::Debug | LogLevel::Trace => egui::Color32::GRAY,
        }
    }
}

#[derive(Clone)]
pub struct LogMessage {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    pub full_line: String,
}

/// Viewer for the application log file.
///
/// A watcher thread tails the file and ships parsed lines through a
/// channel; the window drains the channel each frame it is shown.
pub struct LogWindow {
    pub open: bool,
    log_path: PathBuf,
    log_messages: Arc<Mutex<VecDeque<LogMessage>>>,
    log_receiver: Receiver<Vec<LogMessage>>,
    log_sender: Sender<Vec<LogMessage>>,
    auto_scroll: bool,
    search_query: String,
    filter_level: LogLevel,
    watcher_started: bool,
}

impl Default for LogWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWindow {
    pub fn new() -> Self {
        let (log_sender, log_receiver) = channel();

        Self {
            open: false,
            log_path: Self::get_log_path(),
            log_messages: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_LINES))),
            log_receiver,
            log_sender,
            auto_scroll: true,
            search_query: String::new(),
            filter_level: LogLevel::Info,
            watcher_started: false,
        }
    }

    fn get_log_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "", "ngochap") {
            proj_dirs.data_dir().join("logs").join("ngochap.log")
        } else {
            PathBuf::from("./ngochap.log")
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Tail the log file from its current end, shipping new lines through
    /// the channel. Started lazily on the first show.
    fn start_watcher(&mut self) {
        if self.watcher_started {
            return;
        }
        self.watcher_started = true;

        let log_path = self.log_path.clone();
        let sender = self.log_sender.clone();
        log::info!("Starting log watcher for {}", log_path.display());

        thread::spawn(move || {
            let mut last_position = 0u64;

            loop {
                thread::sleep(Duration::from_millis(UPDATE_INTERVAL_MS));

                let file = match File::open(&log_path) {
                    Ok(f) => f,
                    Err(_) => continue, // File doesn't exist yet
                };

                let mut reader = BufReader::new(file);

                if let Ok(metadata) = std::fs::metadata(&log_path) {
                    let current_size = metadata.len();

                    // File was truncated or replaced
                    if current_size < last_position {
                        last_position = 0;
                    }

                    if reader.seek(SeekFrom::Start(last_position)).is_ok() {
                        let mut new_messages = Vec::new();
                        let mut line = String::new();

                        while reader.read_line(&mut line).unwrap_or(0) > 0 {
                            if !line.trim().is_empty() {
                                if let Some(msg) = Self::parse_log_line(&line) {
                                    new_messages.push(msg);
                                }
                            }
                            line.clear();
                        }

                        if let Ok(pos) = reader.stream_position() {
                            last_position = pos;
                        }

                        if !new_messages.is_empty() && sender.send(new_messages).is_err() {
                            // Window was dropped, stop tailing
                            return;
                        }
                    }
                }
            }
        });
    }

    /// Parse one tracing-format line: `TIMESTAMP LEVEL MODULE: MESSAGE`.
    /// Lines that do not match are kept whole as INFO.
    pub fn parse_log_line(line: &str) -> Option<LogMessage> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parts: Vec<&str> = trimmed.splitn(3, ' ').collect();
        if parts.len() == 3 {
            let potential_level = parts[1].to_uppercase();
            if matches!(
                potential_level.as_str(),
                "ERROR" | "WARN" | "INFO" | "DEBUG" | "TRACE"
            ) {
                return Some(LogMessage {
                    timestamp: parts[0].to_string(),
                    level: potential_level,
                    message: parts[2].trim().to_string(),
                    full_line: line.to_string(),
                });
            }
        }

        Some(LogMessage {
            timestamp: String::new(),
            level: "INFO".to_string(),
            message: trimmed.to_string(),
            full_line: line.to_string(),
        })
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.show_with_focus(ctx, false);
    }

    pub fn show_with_focus(&mut self, ctx: &egui::Context, bring_to_front: bool) {
        if !self.open {
            return;
        }

        self.start_watcher();

        // Drain new messages from the watcher
        while let Ok(new_messages) = self.log_receiver.try_recv() {
            if let Ok(mut messages) = self.log_messages.lock() {
                for msg in new_messages {
                    messages.push_back(msg);
                    while messages.len() > MAX_LOG_LINES {
                        messages.pop_front();
                    }
                }
            }
        }

        let screen_rect = ctx.screen_rect();
        let max_width = screen_rect.width() * 0.9;
        let max_height = screen_rect.height() * 0.9;

        let mut is_open = self.open;

        let mut window = egui::Window::new("Nhật ký")
            .open(&mut is_open)
            .default_size([800.0_f32.min(max_width), 400.0_f32.min(max_height)])
            .max_size([max_width, max_height])
            .constrain(true)
            .resizable(true)
            .movable(true);

        if bring_to_front {
            window = window.order(egui::Order::Foreground);
        }

        window.show(ctx, |ui| {
            self.ui_content(ui);
        });

        self.open = is_open;
    }

    fn ui_content(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Tệp nhật ký:");
            ui.monospace(self.log_path.display().to_string());

            ui.separator();

            ui.checkbox(&mut self.auto_scroll, "Tự cuộn");

            ui.separator();

            ui.label("Mức:");
            egui::ComboBox::from_id_salt("log_filter_level")
                .selected_text(self.filter_level.as_str())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.filter_level, LogLevel::Error, "ERROR");
                    ui.selectable_value(&mut self.filter_level, LogLevel::Warn, "WARN");
                    ui.selectable_value(&mut self.filter_level, LogLevel::Info, "INFO");
                    ui.selectable_value(&mut self.filter_level, LogLevel::Debug, "DEBUG");
                    ui.selectable_value(&mut self.filter_level, LogLevel::Trace, "TRACE");
                });

            ui.separator();

            ui.label("Tìm:");
            ui.text_edit_singleline(&mut self.search_query);

            if ui.button("Xóa").clicked() {
                if let Ok(mut messages) = self.log_messages.lock() {
                    messages.clear();
                }
            }
        });

        ui.separator();

        egui::ScrollArea::both()
            .auto_shrink([false; 2])
            .stick_to_bottom(self.auto_scroll)
            .show(ui, |ui| {
                if let Ok(messages) = self.log_messages.lock() {
                    for msg in messages.iter() {
                        let msg_level = LogLevel::parse(&msg.level);
                        if !msg_level.should_show(&self.filter_level) {
                            continue;
                        }

                        if !self.search_query.is_empty()
                            && !msg
                                .full_line
                                .to_lowercase()
                                .contains(&self.search_query.to_lowercase())
                        {
                            continue;
                        }

                        ui.horizontal(|ui| {
                            ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);

                            if !msg.timestamp.is_empty() {
                                ui.monospace(&msg.timestamp);
                            }
                            ui.label(
                                egui::RichText::new(msg_level.as_str())
                                    .monospace()
                                    .color(msg_level.color()),
                            );
                            ui.monospace(&msg.message);
                        });
                    }
                }
            });
    }
}

impl FocusableWindow for LogWindow {
    type ShowParams = super::window_focus::SimpleShowParams;

    fn window_id(&self) -> &'static str {
        "log_window"
    }

    fn window_title(&self) -> String {
        "Nhật ký".to_string()
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        _params: Self::ShowParams,
        bring_to_front: bool,
    ) {
        LogWindow::show_with_focus(self, ctx, bring_to_front);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tracing_format_line() {
        let line = "2026-08-06T10:02:07.991790Z INFO ngochap::app::reading_client: Requesting reading for 06/08/2026";
        let msg = LogWindow::parse_log_line(line).unwrap();
        assert_eq!(msg.timestamp, "2026-08-06T10:02:07.991790Z");
        assert_eq!(msg.level, "INFO");
        assert!(msg.message.starts_with("ngochap::app::reading_client:"));
    }

    #[test]
    fn unparseable_line_is_kept_whole_as_info() {
        let msg = LogWindow::parse_log_line("   panicked at src/main.rs   ").unwrap();
        assert_eq!(msg.level, "INFO");
        assert_eq!(msg.message, "panicked at src/main.rs");
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(LogWindow::parse_log_line("   \n").is_none());
    }

    #[test]
    fn level_filter_is_inclusive_downwards() {
        assert!(LogLevel::Error.should_show(&LogLevel::Info));
        assert!(LogLevel::Warn.should_show(&LogLevel::Info));
        assert!(LogLevel::Info.should_show(&LogLevel::Info));
        assert!(!LogLevel::Debug.should_show(&LogLevel::Info));
        assert!(!LogLevel::Trace.should_show(&LogLevel::Info));
        assert!(LogLevel::Trace.should_show(&LogLevel::Trace));
    }
}
