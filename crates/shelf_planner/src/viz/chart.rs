//! Category score chart: horizontal bars, best score first.

use egui::{Color32, FontId, Sense, Stroke, vec2};

use shelf_core::text::title_case;
use shelf_core::viz::score_bars;

use crate::style::color32;

use super::{DetailSelection, VizState};

const BAR_HEIGHT: f32 = 22.0;

pub fn draw(ui: &mut egui::Ui, state: &mut VizState) -> Option<DetailSelection> {
    let Some(payload) = &state.payload else {
        return None;
    };

    let bars = score_bars(payload);
    if bars.is_empty() {
        ui.label(egui::RichText::new("Gösterilecek kategori puanı yok.").weak());
        return None;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("score-bars")
        .show(ui, |ui| {
            let full_width = ui.available_width() - 60.0;
            for bar in &bars {
                let (rect, response) = ui.allocate_exact_size(
                    vec2(ui.available_width(), BAR_HEIGHT),
                    Sense::click(),
                );
                let painter = ui.painter();

                let fill_width = (full_width * bar.fraction).max(2.0);
                let fill_rect =
                    egui::Rect::from_min_size(rect.min, vec2(fill_width, BAR_HEIGHT - 4.0));
                painter.rect_filled(fill_rect, 3.0, color32(bar.color));
                if response.hovered() {
                    painter.rect_stroke(fill_rect, 3.0, Stroke::new(1.5, Color32::from_gray(60)));
                }

                // Dark bars carry their label inside, light ones read better
                // in the default text color
                let text_color = if bar.rank <= 3 {
                    Color32::WHITE
                } else {
                    Color32::from_gray(40)
                };
                painter.text(
                    fill_rect.left_center() + vec2(6.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    title_case(&bar.category),
                    FontId::proportional(11.0),
                    text_color,
                );
                painter.text(
                    rect.right_center() - vec2(6.0, 0.0),
                    egui::Align2::RIGHT_CENTER,
                    format!("{:.2}", bar.score),
                    FontId::proportional(11.0),
                    Color32::from_gray(60),
                );

                if response.clicked() {
                    clicked = Some(DetailSelection::Category(bar.category.clone()));
                }
            }
        });

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("Koyu renk yüksek puanı gösterir.").small().weak());
    });
    clicked
}
