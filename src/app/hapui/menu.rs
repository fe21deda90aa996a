use crate::app::hapui::app::ThemeChoice;
use eframe::egui;
use egui::RichText;

#[derive(Debug, PartialEq)]
pub enum MenuAction {
    None,
    ThemeChanged,
    ShowHelp,
    ShowLog,
    Quit,
}

/// Render the top menu bar and report what the user asked for.
pub fn build_menu(ui: &mut egui::Ui, theme: &mut ThemeChoice) -> MenuAction {
    let mut menu_action = MenuAction::None;
    let original_theme = *theme;

    ui.menu_button("Thông Thư", |ui| {
        if ui.button("Hướng dẫn").clicked() {
            menu_action = MenuAction::ShowHelp;
        }
        if ui.button("Nhật ký").clicked() {
            menu_action = MenuAction::ShowLog;
        }
        ui.separator();
        if ui.button("Thoát").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        if ui.button("Latte").clicked() {
            *theme = ThemeChoice::Latte;
        }
        if ui.button("Frappe").clicked() {
            *theme = ThemeChoice::Frappe;
        }
        if ui.button("Macchiato").clicked() {
            *theme = ThemeChoice::Macchiato;
        }
        if ui.button("Mocha").clicked() {
            *theme = ThemeChoice::Mocha;
        }
    });

    if *theme != original_theme {
        menu_action = MenuAction::ThemeChanged;
    }

    menu_action
}
