//! Relationship matrix: lift between every pair of related categories,
//! strongest categories first on both axes.

use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

use shelf_core::palette::RelationTier;
use shelf_core::text::title_case;
use shelf_core::viz::RelationMatrix;

use crate::style::color32;

use super::{DetailSelection, VizState};

pub fn draw(ui: &mut egui::Ui, state: &mut VizState) -> Option<DetailSelection> {
    let Some(payload) = &state.payload else {
        return None;
    };

    let matrix = RelationMatrix::build(payload);
    if matrix.is_empty() {
        ui.label(egui::RichText::new("Gösterilecek kategori ilişkisi yok.").weak());
        return None;
    }

    let mut clicked = None;
    let n = matrix.len();
    let max_height = (ui.available_height() - 60.0).max(200.0);

    egui::ScrollArea::horizontal()
        .id_salt("relation-matrix")
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(false)
                .column(Column::auto().at_least(110.0))
                .columns(Column::auto().at_least(48.0), n)
                .max_scroll_height(max_height)
                .header(22.0, |mut header| {
                    header.col(|_| {});
                    for category in &matrix.categories {
                        header.col(|ui| {
                            ui.label(RichText::new(title_case(category)).small().strong());
                        });
                    }
                })
                .body(|mut body| {
                    for (row, from) in matrix.categories.iter().enumerate() {
                        body.row(22.0, |mut table_row| {
                            table_row.col(|ui| {
                                ui.label(RichText::new(title_case(from)).small().strong());
                            });
                            for (col, to) in matrix.categories.iter().enumerate() {
                                table_row.col(|ui| {
                                    let Some(lift) = matrix.lift(row, col) else {
                                        return;
                                    };
                                    let tier = RelationTier::of(lift);
                                    let cell = egui::Button::new(
                                        RichText::new(format!("{lift:.1}"))
                                            .small()
                                            .color(color32(tier.cell_text_color())),
                                    )
                                    .fill(color32(tier.cell_color()))
                                    .stroke(egui::Stroke::new(
                                        0.5,
                                        Color32::from_gray(200),
                                    ));
                                    if ui.add(cell).clicked() {
                                        clicked = Some(DetailSelection::Relation(
                                            from.clone(),
                                            to.clone(),
                                        ));
                                    }
                                });
                            }
                        });
                    }
                });
        });

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        let tiers = [
            (RelationTier::VeryStrong, "3+"),
            (RelationTier::Strong, "2+"),
            (RelationTier::Moderate, "1.5+"),
            (RelationTier::Weak, "1.2+"),
            (RelationTier::VeryWeak, "1+"),
        ];
        for (tier, range) in tiers {
            let chip = egui::Button::new(
                RichText::new(range)
                    .small()
                    .color(color32(tier.cell_text_color())),
            )
            .fill(color32(tier.cell_color()))
            .sense(egui::Sense::hover());
            ui.add(chip);
            ui.label(RichText::new(tier.to_string()).small());
        }
    });
    clicked
}
