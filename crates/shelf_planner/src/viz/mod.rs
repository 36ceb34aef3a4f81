//! The three linked visualization panels plus the shared detail area.
//!
//! The payload arrives with a playground response and is read-only here;
//! panel models are rebuilt from it each frame through `shelf_core::viz`.

mod chart;
mod detail;
mod map;
mod matrix;

use egui::RichText;
use log::error;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use shelf_core::api::{OptimizationGoal, VisualizationPayload};
use shelf_core::geometry::Vec2f;
use shelf_core::svg::export_shelf_map;
use shelf_core::viz::ShelfMapView;

use crate::app::PlannerApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum VizTab {
    #[default]
    #[strum(serialize = "Raf Haritası")]
    Map,
    #[strum(serialize = "Kategori Puanları")]
    Scores,
    #[strum(serialize = "İlişki Matrisi")]
    Matrix,
}

/// What the user last clicked, driving the detail area
#[derive(Debug, Clone, PartialEq)]
pub enum DetailSelection {
    Shelf(String),
    Category(String),
    Relation(String, String),
}

#[derive(Default)]
pub struct VizState {
    pub payload: Option<VisualizationPayload>,
    pub tab: VizTab,
    pub detail: Option<DetailSelection>,
    /// Container size of the last painted map, reused for SVG export
    pub map_container: Vec2f,
}

impl VizState {
    /// A new playground result replaces the previous panels wholesale.
    pub fn set_payload(&mut self, payload: VisualizationPayload) {
        self.payload = Some(payload);
        self.detail = None;
    }
}

impl PlannerApp {
    pub fn draw_viz_view(&mut self, ui: &mut egui::Ui) {
        if self.viz.payload.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(
                        "Görselleştirme için önce playground üzerinden bir öneri alın.",
                    )
                    .weak(),
                );
            });
            return;
        }

        ui.horizontal(|ui| {
            for tab in VizTab::iter() {
                ui.selectable_value(&mut self.viz.tab, tab, tab.to_string());
            }
            if self.viz.tab == VizTab::Map {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("💾 SVG Aktar").clicked() {
                        self.export_map_svg();
                    }
                });
            }
        });
        ui.separator();

        let selection = match self.viz.tab {
            VizTab::Map => map::draw(ui, &mut self.viz),
            VizTab::Scores => chart::draw(ui, &mut self.viz),
            VizTab::Matrix => matrix::draw(ui, &mut self.viz),
        };
        if selection.is_some() {
            self.viz.detail = selection;
        }

        ui.separator();
        detail::draw(ui, &self.viz);
    }

    fn export_map_svg(&mut self) {
        let Some(payload) = &self.viz.payload else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("raf-haritasi.svg")
            .save_file()
        else {
            return;
        };

        let container = if self.viz.map_container.x > 0.0 {
            self.viz.map_container
        } else {
            Vec2f::new(760.0, 460.0)
        };
        let view = ShelfMapView::build(payload, container);
        match export_shelf_map(&view, payload.optimization_type, container, &path) {
            Ok(()) => self.set_status(format!("Harita kaydedildi: {}", path.display())),
            Err(e) => {
                error!("SVG export failed: {e}");
                self.alert = Some(format!("Harita kaydedilemedi: {e}"));
            }
        }
    }
}

/// Shared intro text shown while nothing is selected.
fn intro_text(goal: OptimizationGoal) -> &'static str {
    match goal {
        OptimizationGoal::Maximize => {
            "Birlikte sıkça satın alınan kategoriler yakın raflara yerleştirildi. \
             Koyu renk yüksek puanı, çizgiler kategori ilişkilerini gösterir. \
             Detay için raf, çubuk veya hücreye tıklayın."
        }
        OptimizationGoal::Minimize => {
            "Birlikte sıkça satın alınan kategoriler birbirinden uzak raflara \
             yerleştirildi. Raflar iki gruba ayrılır; kesikli çizgilerin \
             soluklaşması başarılı ayrıştırmayı gösterir. Detay için raf, çubuk \
             veya hücreye tıklayın."
        }
    }
}
