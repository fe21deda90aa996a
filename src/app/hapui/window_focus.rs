//! Window focus management.
//!
//! Trait-based mechanism for bringing auxiliary windows to the foreground
//! when they are opened from the menu bar.

use eframe::egui;

/// Trait for windows that can be brought to the foreground.
///
/// When `bring_to_front` is true the window renders itself with
/// `egui::Order::Foreground` so it appears above other windows.
pub trait FocusableWindow {
    /// Parameters required by the show method. Simple windows use
    /// [`SimpleShowParams`].
    type ShowParams;

    /// Unique identifier for this window type.
    fn window_id(&self) -> &'static str;

    /// Title as it appears in the window's title bar.
    fn window_title(&self) -> String;

    /// Whether this window is currently open.
    fn is_open(&self) -> bool;

    /// Render the window, optionally in the foreground.
    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        params: Self::ShowParams,
        bring_to_front: bool,
    );
}

/// Parameters for windows that need no extra data to show themselves.
pub type SimpleShowParams = ();

/// Tracks which window should be brought to the front on the next frame.
#[derive(Default)]
pub struct WindowFocusManager {
    bring_to_front_window: Option<String>,
}

impl WindowFocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that `window_id` be brought to the front.
    pub fn request_focus(&mut self, window_id: String) {
        self.bring_to_front_window = Some(window_id);
    }

    /// Whether `window_id` should render in the foreground this frame.
    pub fn should_bring_to_front(&self, window_id: &str) -> bool {
        self.bring_to_front_window.as_deref() == Some(window_id)
    }

    /// Clear the request once the window has rendered in the foreground,
    /// so it does not stay pinned there.
    pub fn clear_bring_to_front(&mut self, window_id: &str) {
        if self.should_bring_to_front(window_id) {
            self.bring_to_front_window = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_request_targets_one_window() {
        let mut manager = WindowFocusManager::new();
        assert!(!manager.should_bring_to_front("help_window"));

        manager.request_focus("help_window".to_string());
        assert!(manager.should_bring_to_front("help_window"));
        assert!(!manager.should_bring_to_front("log_window"));

        // Clearing an unrelated window leaves the request alone
        manager.clear_bring_to_front("log_window");
        assert!(manager.should_bring_to_front("help_window"));

        manager.clear_bring_to_front("help_window");
        assert!(!manager.should_bring_to_front("help_window"));
    }
}
