//! The shelf canvas: drawing, drag/resize wiring, selection and inline
//! rename. All geometry mutations go through the core board so every move
//! and resize is clamped in one place.

use egui::{Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, pos2, vec2};

use shelf_core::Vec2f;
use shelf_core::palette::shelf_theme;

use crate::app::{PendingConfirm, PlannerApp};
use crate::style::color32;

const HANDLE_SIZE: f32 = 14.0;
const DELETE_SIZE: f32 = 16.0;

/// Inline rename state for one shelf label
pub struct RenameEdit {
    pub id: u32,
    pub buffer: String,
    pub request_focus: bool,
}

impl PlannerApp {
    pub fn draw_board_view(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("➕ Raf Ekle").clicked() {
                let container = self.last_container;
                let name = self.board.add_shelf(container).name.clone();
                self.set_status(format!("{name} eklendi"));
            }
            let clear_enabled = !self.board.is_empty();
            if ui
                .add_enabled(clear_enabled, egui::Button::new("🗑 Tümünü Temizle"))
                .clicked()
            {
                self.pending_confirm = Some(PendingConfirm::ClearAll);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} raf", self.board.len()));
            });
        });
        ui.add_space(4.0);

        let available = ui.available_size();
        let (canvas, painter) = ui.allocate_painter(available, Sense::click());
        let origin = canvas.rect.min;
        let container = Vec2f::new(canvas.rect.width(), canvas.rect.height());
        self.last_container = container;
        // The window may have shrunk since the last frame
        self.board.clamp_all(container);

        painter.rect_filled(canvas.rect, 4.0, Color32::from_gray(250));
        painter.rect_stroke(canvas.rect, 4.0, Stroke::new(1.0, Color32::from_gray(215)));
        if self.board.is_empty() {
            painter.text(
                canvas.rect.center(),
                egui::Align2::CENTER_CENTER,
                "Raf eklemek için \"Raf Ekle\" düğmesini kullanın",
                FontId::proportional(14.0),
                Color32::from_gray(150),
            );
        }

        let pointer = ui.ctx().input(|i| i.pointer.interact_pos());
        let canvas_pointer =
            pointer.map(|p| Vec2f::new(p.x - origin.x, p.y - origin.y));

        // Draw the active shelf last so it stays on top mid-gesture
        let mut ids: Vec<u32> = self.board.iter().map(|s| s.id).collect();
        if let Some(active) = self.drag.active_shelf() {
            ids.retain(|id| *id != active);
            ids.push(active);
        }

        let mut delete_request = None;
        for id in ids {
            let Some(shelf) = self.board.shelf(id) else {
                continue;
            };
            let rect = Rect::from_min_size(
                origin + vec2(shelf.pos.x, shelf.pos.y),
                vec2(shelf.size.x, shelf.size.y),
            );
            let name = shelf.name.clone();
            let category = shelf.display_category.clone();
            let theme = *shelf_theme(shelf.theme);
            let selected = self.selected == Some(id);

            let handle_rect = Rect::from_min_size(
                rect.max - vec2(HANDLE_SIZE, HANDLE_SIZE),
                vec2(HANDLE_SIZE, HANDLE_SIZE),
            );
            // The handle is registered after the body so it wins the
            // hit-test on the shared corner
            let body = ui.interact(rect, ui.id().with(("shelf-body", id)), Sense::click_and_drag());
            let handle = ui.interact(
                handle_rect,
                ui.id().with(("shelf-handle", id)),
                Sense::drag(),
            );

            if let Some(p) = canvas_pointer {
                if handle.drag_started() {
                    self.drag.press_handle(&self.board, id, p);
                } else if body.drag_started() && !handle_rect.contains(pointer.unwrap_or(Pos2::ZERO)) {
                    self.drag.press_body(&self.board, id, p);
                }
                if (body.dragged() || handle.dragged()) && !self.drag.is_idle() {
                    self.drag.pointer_moved(&mut self.board, p, container);
                }
            }
            if body.drag_stopped() || handle.drag_stopped() {
                self.drag.release();
            }

            if body.clicked() {
                self.selected = Some(id);
            }
            if body.double_clicked() {
                self.rename = Some(RenameEdit {
                    id,
                    buffer: name.clone(),
                    request_focus: true,
                });
            }
            if body.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
            if handle.hovered() || matches!(self.drag.active_shelf(), Some(a) if a == id && !self.drag.is_idle() && handle.dragged())
            {
                ui.ctx().set_cursor_icon(CursorIcon::ResizeNwSe);
            }

            // Repaint with possibly updated geometry
            let Some(shelf) = self.board.shelf(id) else {
                continue;
            };
            let rect = Rect::from_min_size(
                origin + vec2(shelf.pos.x, shelf.pos.y),
                vec2(shelf.size.x, shelf.size.y),
            );

            painter.rect_filled(rect, 6.0, color32(theme.fill));
            let stroke = if selected {
                Stroke::new(2.5, color32(theme.border))
            } else {
                Stroke::new(1.5, color32(theme.border))
            };
            painter.rect_stroke(rect, 6.0, stroke);

            let editing = matches!(&self.rename, Some(edit) if edit.id == id);
            if !editing {
                let name_font = label_font_size(rect.width());
                let label = fit_label(ui, &name, name_font, rect.width() - 12.0);
                let name_pos = if category.is_some() {
                    rect.center() - vec2(0.0, 7.0)
                } else {
                    rect.center()
                };
                painter.text(
                    name_pos,
                    egui::Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(name_font),
                    color32(theme.text),
                );
                if let Some(category) = &category {
                    let cat_font = (name_font - 2.0).max(8.0);
                    let label = fit_label(ui, category, cat_font, rect.width() - 12.0);
                    painter.text(
                        rect.center() + vec2(0.0, 9.0),
                        egui::Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(cat_font),
                        color32(theme.text).gamma_multiply(0.8),
                    );
                }
            }

            // Resize grip in the bottom-right corner
            let grip = color32(theme.border).gamma_multiply(0.8);
            for step in [4.0, 8.0, 12.0] {
                painter.line_segment(
                    [
                        pos2(rect.max.x - step, rect.max.y - 3.0),
                        pos2(rect.max.x - 3.0, rect.max.y - step),
                    ],
                    Stroke::new(1.0, grip),
                );
            }

            if selected {
                let delete_rect = Rect::from_min_size(
                    pos2(rect.max.x - DELETE_SIZE - 3.0, rect.min.y + 3.0),
                    vec2(DELETE_SIZE, DELETE_SIZE),
                );
                let delete = ui.interact(
                    delete_rect,
                    ui.id().with(("shelf-delete", id)),
                    Sense::click(),
                );
                let delete_color = if delete.hovered() {
                    Color32::from_rgb(0xdc, 0x35, 0x45)
                } else {
                    color32(theme.text)
                };
                painter.text(
                    delete_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "✕",
                    FontId::proportional(12.0),
                    delete_color,
                );
                if delete.clicked() {
                    delete_request = Some(id);
                }
            }

            if editing {
                self.draw_rename_editor(ui, id, rect);
            }
        }

        if let Some(id) = delete_request {
            self.pending_confirm = Some(PendingConfirm::DeleteShelf(id));
        }

        // A release anywhere in the window ends the gesture, even when the
        // pointer left the shelf rect first
        if ui.input(|i| i.pointer.any_released()) {
            self.drag.release();
        }

        if canvas.clicked() {
            self.selected = None;
        }
    }

    fn draw_rename_editor(&mut self, ui: &mut egui::Ui, id: u32, rect: Rect) {
        let Some(edit) = self.rename.as_mut() else {
            return;
        };
        let edit_rect = Rect::from_center_size(
            rect.center(),
            vec2((rect.width() - 14.0).max(60.0), 20.0),
        );
        let response = ui.put(edit_rect, egui::TextEdit::singleline(&mut edit.buffer));
        if edit.request_focus {
            response.request_focus();
            edit.request_focus = false;
        }

        let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if escape {
            self.rename = None;
        } else if enter || response.lost_focus() {
            let buffer = edit.buffer.clone();
            self.board.rename(id, &buffer);
            self.rename = None;
        }
    }
}

fn label_font_size(width: f32) -> f32 {
    (width / 10.0).clamp(10.0, 14.0)
}

/// Truncates a label with an ellipsis once its measured width no longer
/// fits the shelf.
fn fit_label(ui: &egui::Ui, text: &str, font_size: f32, max_width: f32) -> String {
    let font = FontId::proportional(font_size);
    let width = |s: &str| {
        ui.fonts(|f| {
            f.layout_no_wrap(s.to_string(), font.clone(), Color32::PLACEHOLDER)
                .rect
                .width()
        })
    };
    if width(text) <= max_width {
        return text.to_string();
    }

    let mut truncated: String = text.to_string();
    while !truncated.is_empty() {
        truncated.pop();
        let candidate = format!("{truncated}…");
        if width(&candidate) <= max_width {
            return candidate;
        }
    }
    "…".to_string()
}
