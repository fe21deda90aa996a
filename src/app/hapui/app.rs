use super::help_window::HelpWindow;
use super::log_window::LogWindow;
use super::menu;
use super::menu::MenuAction;
use super::reading_page::ReadingPage;
use super::window_focus::{FocusableWindow, WindowFocusManager};
use eframe::egui;
use tracing::info;

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Default)]
pub enum ThemeChoice {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

/// Top-level application state.
///
/// Only the theme is persisted between runs; the consultation state always
/// starts over at idle.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct HapApp {
    pub theme: ThemeChoice,

    #[serde(skip)]
    pub reading_page: ReadingPage,
    #[serde(skip)]
    pub help_window: HelpWindow,
    #[serde(skip)]
    pub log_window: LogWindow,
    #[serde(skip)]
    pub window_focus_manager: WindowFocusManager,
}

impl Default for HapApp {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            reading_page: ReadingPage::new(),
            help_window: HelpWindow::new(),
            log_window: LogWindow::new(),
            window_focus_manager: WindowFocusManager::new(),
        }
    }
}

impl HapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let app: HapApp = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.apply_theme(&cc.egui_ctx);

        app
    }

    pub fn apply_theme(&self, ctx: &egui::Context) {
        match self.theme {
            ThemeChoice::Latte => catppuccin_egui::set_theme(ctx, catppuccin_egui::LATTE),
            ThemeChoice::Frappe => catppuccin_egui::set_theme(ctx, catppuccin_egui::FRAPPE),
            ThemeChoice::Macchiato => catppuccin_egui::set_theme(ctx, catppuccin_egui::MACCHIATO),
            ThemeChoice::Mocha => catppuccin_egui::set_theme(ctx, catppuccin_egui::MOCHA),
        }
    }

    fn render_top_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                match menu::build_menu(ui, &mut self.theme) {
                    MenuAction::ThemeChanged => {
                        info!("Theme changed to {}", self.theme);
                        self.apply_theme(ctx);
                    }
                    MenuAction::ShowHelp => {
                        self.help_window.open = true;
                        self.window_focus_manager
                            .request_focus(self.help_window.window_id().to_string());
                    }
                    MenuAction::ShowLog => {
                        self.log_window.toggle();
                        if self.log_window.open {
                            self.window_focus_manager
                                .request_focus(self.log_window.window_id().to_string());
                        }
                    }
                    MenuAction::Quit => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    MenuAction::None => {}
                }
            });
        });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let max_width = ui.available_width().min(800.0);
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(max_width);
                        self.reading_page.show(ui);
                    });
                });
        });
    }

    fn handle_help_window(&mut self, ctx: &egui::Context) {
        show_focusable(&mut self.help_window, ctx, &mut self.window_focus_manager);
    }

    fn handle_log_window(&mut self, ctx: &egui::Context) {
        show_focusable(&mut self.log_window, ctx, &mut self.window_focus_manager);
    }
}

/// Render a simple window, honoring a pending foreground request for it.
fn show_focusable<W>(window: &mut W, ctx: &egui::Context, focus: &mut WindowFocusManager)
where
    W: FocusableWindow<ShowParams = ()>,
{
    let window_id = window.window_id();
    let bring_to_front = focus.should_bring_to_front(window_id);
    window.show_with_focus(ctx, (), bring_to_front);
    if bring_to_front {
        focus.clear_bring_to_front(window_id);
    }
}

impl eframe::App for HapApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_menu_bar(ctx);
        self.render_central_panel(ctx);

        self.handle_help_window(ctx);
        self.handle_log_window(ctx);
    }
}
