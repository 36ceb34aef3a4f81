//! Shared detail area under the panels: shelf, category or relation
//! details for the last clicked element, or the mode explanation when
//! nothing is selected yet.

use egui::{Color32, RichText};

use shelf_core::api::OptimizationGoal;
use shelf_core::palette::RelationTier;
use shelf_core::text::title_case;
use shelf_core::viz::{
    PlacementVerdict, category_detail, relation_detail, shelf_detail,
};

use crate::style::color32;

use super::{DetailSelection, VizState, intro_text};

pub fn draw(ui: &mut egui::Ui, state: &VizState) {
    let Some(payload) = &state.payload else {
        return;
    };

    egui::ScrollArea::vertical()
        .id_salt("viz-detail")
        .max_height(130.0)
        .show(ui, |ui| match &state.detail {
            None => {
                ui.label(RichText::new(intro_text(payload.optimization_type)).weak());
            }
            Some(DetailSelection::Shelf(shelf)) => {
                let Some(detail) = shelf_detail(payload, shelf) else {
                    ui.label(RichText::new(format!("{shelf} için atama bilgisi yok.")).weak());
                    return;
                };
                ui.label(RichText::new(format!("{shelf} Detayları")).strong());
                detail_row(
                    ui,
                    "Atanan Kategori",
                    &detail
                        .category
                        .as_deref()
                        .map(title_case)
                        .unwrap_or_else(|| "Atanmadı".to_string()),
                );
                if let Some(reason) = &detail.reason {
                    detail_row(ui, "Atama Nedeni", reason);
                }
                detail_row(ui, "Kategori Puanı", &format!("{:.2}", detail.score));
                detail_row(
                    ui,
                    "Puan Sıralaması",
                    &detail
                        .rank
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                );
                if !detail.relations.is_empty() {
                    ui.label(RichText::new("İlişkili Kategoriler:").strong());
                    for rel in &detail.relations {
                        relation_row(ui, &title_case(&rel.category), rel.lift, None);
                    }
                }
            }
            Some(DetailSelection::Category(category)) => {
                let detail = category_detail(payload, category);
                ui.label(
                    RichText::new(format!("{} Kategori Detayları", title_case(category)))
                        .strong(),
                );
                detail_row(ui, "Kategori Puanı", &format!("{:.2}", detail.score));
                detail_row(ui, "Puan Sıralaması", &detail.rank.to_string());
                detail_row(
                    ui,
                    "Atandığı Raf",
                    detail.assigned_shelf.as_deref().unwrap_or("Atanmadı"),
                );
                if !detail.relations.is_empty() {
                    ui.label(RichText::new("İlişkili Olduğu Kategoriler:").strong());
                    for related in &detail.relations {
                        relation_row(
                            ui,
                            &title_case(&related.relation.category),
                            related.relation.lift,
                            related.shelf.as_deref(),
                        );
                    }
                }
            }
            Some(DetailSelection::Relation(from, to)) => {
                let Some(detail) = relation_detail(payload, from, to) else {
                    ui.label(RichText::new("Bu kategoriler arasında kural yok.").weak());
                    return;
                };
                ui.label(RichText::new("Kategori İlişki Detayları").strong());
                detail_row(
                    ui,
                    "Kategoriler",
                    &format!("{} ve {}", title_case(from), title_case(to)),
                );
                ui.horizontal(|ui| {
                    ui.label(RichText::new("İlişki Gücü (Lift):").strong());
                    tier_badge(ui, detail.tier, detail.lift);
                    ui.label(RichText::new(detail.tier.to_string()).small());
                });
                detail_row(
                    ui,
                    "Güven (Confidence)",
                    &format!("{:.1}%", detail.confidence * 100.0),
                );
                if let Some((shelf_a, shelf_b)) = &detail.shelves {
                    detail_row(ui, "Atandıkları Raflar", &format!("{shelf_a} ve {shelf_b}"));
                }
                if let Some(distance) = detail.distance {
                    detail_row(ui, "Raflar Arası Mesafe", &format!("{distance:.1} birim"));
                }
                if let Some(verdict) = detail.verdict {
                    verdict_row(ui, payload.optimization_type, verdict);
                }
            }
        });
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

fn relation_row(ui: &mut egui::Ui, category: &str, lift: f64, shelf: Option<&str>) {
    ui.horizontal(|ui| {
        ui.label(format!("  {category}"));
        tier_badge(ui, RelationTier::of(lift), lift);
        if let Some(shelf) = shelf {
            ui.label(RichText::new(format!("(Raf: {shelf})")).small().weak());
        }
    });
}

fn tier_badge(ui: &mut egui::Ui, tier: RelationTier, lift: f64) {
    let badge = egui::Button::new(
        RichText::new(format!("{lift:.1}"))
            .small()
            .color(color32(tier.cell_text_color())),
    )
    .fill(color32(tier.cell_color()))
    .sense(egui::Sense::hover());
    ui.add(badge);
}

fn verdict_row(ui: &mut egui::Ui, goal: OptimizationGoal, verdict: PlacementVerdict) {
    let (text, color) = match (goal, verdict) {
        (OptimizationGoal::Maximize, PlacementVerdict::Achieved) => (
            "✓ İlişkili kategoriler başarıyla yakın raflara yerleştirilmiş.",
            Color32::from_rgb(0x28, 0xa7, 0x45),
        ),
        (OptimizationGoal::Maximize, PlacementVerdict::Violated) => (
            "✗ İlişkili kategoriler uzak raflara yerleştirilmiş.",
            Color32::from_rgb(0xdc, 0x35, 0x45),
        ),
        (OptimizationGoal::Minimize, PlacementVerdict::Achieved) => (
            "✓ İlişkili kategoriler başarıyla uzak raflara yerleştirilmiş.",
            Color32::from_rgb(0x28, 0xa7, 0x45),
        ),
        (OptimizationGoal::Minimize, PlacementVerdict::Violated) => (
            "✗ İlişkili kategoriler yakın raflara yerleştirilmiş.",
            Color32::from_rgb(0xdc, 0x35, 0x45),
        ),
        (_, PlacementVerdict::Partial) => (
            "⚠ İlişkili kategoriler orta mesafede raflara yerleştirilmiş.",
            Color32::from_rgb(0xff, 0xc1, 0x07),
        ),
    };
    ui.horizontal(|ui| {
        ui.label(RichText::new("Optimizasyon Yorumu:").strong());
        ui.label(RichText::new(text).color(color));
    });
}
