use super::window_focus::FocusableWindow;
use eframe::egui;
use egui::{Context, RichText, Ui};

#[derive(Default)]
pub struct HelpWindow {
    pub open: bool,
}

impl HelpWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context) {
        self.show_with_focus(ctx, false);
    }

    pub fn show_with_focus(&mut self, ctx: &Context, bring_to_front: bool) {
        if !self.open {
            return;
        }

        let central_panel_size = ctx.available_rect().size();
        let window_width = central_panel_size.x.min(480.0);
        let window_height = central_panel_size.y.min(420.0);

        let mut is_open = self.open;

        let mut window = egui::Window::new("Hướng dẫn")
            .open(&mut is_open)
            .fixed_size([window_width, window_height])
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .resizable(false)
            .collapsible(false);

        if bring_to_front {
            window = window.order(egui::Order::Foreground);
        }

        window.show(ctx, |ui| {
            self.ui_content(ui);
        });

        self.open = is_open;
    }

    fn ui_content(&self, ui: &mut Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(5.0);

            ui.heading("Cách sử dụng");
            ui.add_space(5.0);

            ui.label("1. Chọn ngày dương lịch muốn tra cứu (định dạng ngày/tháng/năm).");
            ui.label("2. Bấm nút \"Khai Mở Thiên Cơ\" để gửi yêu cầu luận giải.");
            ui.label("3. Đọc lời giải: thông tin ngày, tiết khí, phân tích sao, việc nên làm và giờ hoàng đạo.");

            ui.add_space(15.0);

            ui.heading("Lưu ý");
            ui.add_space(5.0);

            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Kết nối mạng:").strong());
                ui.label("ứng dụng cần Internet để hỏi máy chủ AI. Nếu mất kết nối, hãy thử lại sau.");
            });
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("Nội dung:").strong());
                ui.label("lời giải do AI tạo ra, chỉ mang tính tham khảo.");
            });

            ui.add_space(15.0);

            ui.heading("Menu");
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("Nhật ký").strong());
                ui.label("- Xem nhật ký hoạt động của ứng dụng");
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("🎨").strong());
                ui.label("- Đổi giao diện sáng / tối");
            });

            ui.add_space(20.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("Ngọc Hạp Thông Thư v{}", env!("CARGO_PKG_VERSION")))
                        .small()
                        .weak(),
                );
            });
        });
    }
}

impl FocusableWindow for HelpWindow {
    type ShowParams = super::window_focus::SimpleShowParams;

    fn window_id(&self) -> &'static str {
        "help_window"
    }

    fn window_title(&self) -> String {
        "Hướng dẫn".to_string()
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
        HelpWindow::show_with_focus(self, ctx, bring_to_front);
    }
}
