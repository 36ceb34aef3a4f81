//! Shelf map panel: normalized nodes, relation edges and the mode legend.

use egui::{Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, pos2, vec2};

use shelf_core::api::OptimizationGoal;
use shelf_core::constants::MAP_NODE_SIZE;
use shelf_core::geometry::Vec2f;
use shelf_core::palette::{RelationTier, hsl_to_rgb};
use shelf_core::text::title_case;
use shelf_core::viz::{SeparationMark, ShelfMapView};

use crate::style::{color32, color32_alpha};

use super::{DetailSelection, VizState};

const NODE_FALLBACK: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);

pub fn draw(ui: &mut egui::Ui, state: &mut VizState) -> Option<DetailSelection> {
    let Some(payload) = &state.payload else {
        return None;
    };

    let height = (ui.available_height() - 160.0).max(260.0);
    let size = vec2(ui.available_width(), height);
    let (canvas, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = canvas.rect.min;
    let container = Vec2f::new(canvas.rect.width(), canvas.rect.height());
    state.map_container = container;

    painter.rect_filled(canvas.rect, 4.0, Color32::from_gray(252));
    painter.rect_stroke(canvas.rect, 4.0, Stroke::new(1.0, Color32::from_gray(220)));

    let view = ShelfMapView::build(payload, container);
    let to_screen = |p: Vec2f| -> Pos2 { pos2(origin.x + p.x, origin.y + p.y) };

    for edge in &view.edges {
        let a = to_screen(edge.a);
        let b = to_screen(edge.b);
        let stroke = Stroke::new(edge.width, color32_alpha(edge.color, edge.opacity));
        if edge.dashed {
            painter.extend(Shape::dashed_line(&[a, b], stroke, 6.0, 4.0));
        } else {
            painter.line_segment([a, b], stroke);
        }

        if let Some(label) = &edge.label {
            let mid = pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0 - 8.0);
            let color = match label.mark {
                SeparationMark::Separated => Color32::from_rgb(0x28, 0xa7, 0x45),
                SeparationMark::TooClose => Color32::from_rgb(0xdc, 0x35, 0x45),
                SeparationMark::None => Color32::from_gray(90),
            };
            painter.text(
                mid,
                egui::Align2::CENTER_CENTER,
                &label.text,
                FontId::proportional(10.0),
                color,
            );
        }
    }

    let radius = MAP_NODE_SIZE / 2.0;
    let mut clicked = None;
    for node in &view.nodes {
        let center = to_screen(node.center);
        let fill = node.color.map(color32).unwrap_or(NODE_FALLBACK);

        let node_rect = Rect::from_center_size(center, vec2(MAP_NODE_SIZE, MAP_NODE_SIZE));
        let response = ui.interact(
            node_rect,
            ui.id().with(("map-node", &node.shelf)),
            Sense::click(),
        );

        let ring = if response.hovered() {
            Stroke::new(3.0, Color32::from_gray(60))
        } else {
            Stroke::new(2.0, Color32::WHITE)
        };
        painter.circle_filled(center, radius, fill);
        painter.circle_stroke(center, radius, ring);

        painter.text(
            center - vec2(0.0, 6.0),
            egui::Align2::CENTER_CENTER,
            &node.shelf,
            FontId::proportional(10.0),
            Color32::WHITE,
        );
        let category = node
            .category
            .as_deref()
            .map(title_case)
            .unwrap_or_else(|| "Atanmadı".to_string());
        painter.text(
            center + vec2(0.0, 7.0),
            egui::Align2::CENTER_CENTER,
            category,
            FontId::proportional(8.0),
            Color32::WHITE.gamma_multiply(0.85),
        );

        if response.clicked() {
            clicked = Some(DetailSelection::Shelf(node.shelf.clone()));
        }
    }

    draw_legend(ui, payload.optimization_type);
    clicked
}

fn draw_legend(ui: &mut egui::Ui, goal: OptimizationGoal) {
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        match goal {
            OptimizationGoal::Maximize => {
                legend_chip(ui, hue_chip(211.0, 100.0, 20.0), "Yüksek puanlı");
                legend_chip(ui, hue_chip(211.0, 100.0, 50.0), "Orta");
                legend_chip(ui, hue_chip(211.0, 100.0, 80.0), "Düşük puanlı");
            }
            OptimizationGoal::Minimize => {
                legend_chip(ui, hue_chip(354.0, 70.0, 30.0), "Grup 1 - yüksek puanlı");
                legend_chip(ui, hue_chip(150.0, 70.0, 30.0), "Grup 2 - yüksek puanlı");
                legend_chip(ui, hue_chip(354.0, 70.0, 70.0), "Grup 1 - düşük puanlı");
                legend_chip(ui, hue_chip(150.0, 70.0, 70.0), "Grup 2 - düşük puanlı");
            }
        }
        ui.separator();
        let tiers = [
            (RelationTier::VeryStrong, "Çok güçlü (>3)"),
            (RelationTier::Strong, "Güçlü (>2)"),
            (RelationTier::Moderate, "Orta (>1.5)"),
        ];
        for (tier, label) in tiers {
            let (color, opacity) = match goal {
                OptimizationGoal::Maximize => tier.edge_style_maximize(),
                OptimizationGoal::Minimize => tier.edge_style_minimize(),
            };
            legend_line(ui, color32_alpha(color, opacity), tier.edge_width(), label);
        }
        if goal == OptimizationGoal::Minimize {
            ui.label(
                egui::RichText::new("Soluk çizgiler başarılı ayrıştırmayı gösterir.")
                    .small()
                    .weak(),
            );
        }
    });
}

fn hue_chip(h: f32, s: f32, l: f32) -> Color32 {
    color32(hsl_to_rgb(h, s, l))
}

fn legend_chip(ui: &mut egui::Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.label(egui::RichText::new(label).small());
}

fn legend_line(ui: &mut egui::Ui, color: Color32, width: f32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(vec2(20.0, 12.0), Sense::hover());
    ui.painter().line_segment(
        [
            pos2(rect.min.x, rect.center().y),
            pos2(rect.max.x, rect.center().y),
        ],
        Stroke::new(width, color),
    );
    ui.label(egui::RichText::new(label).small());
}
