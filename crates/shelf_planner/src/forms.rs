//! The three submission forms: single predict, bulk predict and playground
//! recommend. Each validates its inputs, shows a pre-upload preview of the
//! chosen order file and gates its submit button while a request is in
//! flight.

use std::path::PathBuf;

use egui::RichText;
use log::warn;
use strum::IntoEnumIterator;

use shelf_core::api::{BulkResponse, ModelChoice, OptimizationGoal, PlaygroundResponse};
use shelf_core::orders::{OrdersPreview, preview_orders_file};

use crate::app::PlannerApp;
use crate::backend::BackendRequest;

#[derive(Default)]
pub struct PredictForm {
    pub product_name: String,
    pub model: ModelChoice,
    pub in_flight: bool,
    pub result: Option<String>,
    pub error: Option<String>,
}

/// A picked order CSV with its pre-upload summary
#[derive(Default)]
pub struct OrderFilePick {
    pub path: Option<PathBuf>,
    pub preview: Option<OrdersPreview>,
}

#[derive(Default)]
pub struct BulkForm {
    pub file: OrderFilePick,
    pub model: ModelChoice,
    pub in_flight: bool,
    pub response: Option<BulkResponse>,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct PlaygroundForm {
    pub file: OrderFilePick,
    pub model: ModelChoice,
    pub goal: OptimizationGoal,
    pub in_flight: bool,
    pub response: Option<PlaygroundResponse>,
    pub error: Option<String>,
    /// Shelf names in board order at submit time; recommendations render
    /// in this order, not the backend's
    pub submitted_order: Vec<String>,
}

impl PlannerApp {
    pub fn draw_forms_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::CollapsingHeader::new(RichText::new("Tek Ürün Tahmini").strong())
                .default_open(true)
                .show(ui, |ui| self.draw_predict_form(ui));
            ui.separator();

            egui::CollapsingHeader::new(RichText::new("Toplu Tahmin ve Birliktelik Analizi").strong())
                .default_open(false)
                .show(ui, |ui| self.draw_bulk_form(ui));
            ui.separator();

            egui::CollapsingHeader::new(RichText::new("Raf Önerisi (Playground)").strong())
                .default_open(true)
                .show(ui, |ui| self.draw_playground_form(ui));
        });
    }

    fn draw_predict_form(&mut self, ui: &mut egui::Ui) {
        ui.label("Ürün adı:");
        ui.text_edit_singleline(&mut self.predict.product_name);
        model_combo(ui, "predict-model", &mut self.predict.model);

        let submit = ui
            .add_enabled(!self.predict.in_flight, egui::Button::new("Tahmin Et"))
            .clicked();
        loading_row(ui, self.predict.in_flight);

        if submit {
            if self.predict.product_name.trim().is_empty() {
                self.alert = Some("Lütfen bir ürün ismi girin.".to_string());
            } else {
                self.predict.result = None;
                self.predict.error = None;
                self.predict.in_flight = true;
                self.backend.submit(BackendRequest::Predict {
                    product_name: self.predict.product_name.trim().to_string(),
                    model: self.predict.model,
                });
            }
        }

        self.draw_predict_result(ui);
    }

    fn draw_bulk_form(&mut self, ui: &mut egui::Ui) {
        let picked = file_picker_row(ui, "bulk-file", &self.bulk.file);
        if let Some(pick) = picked {
            self.apply_file_pick(pick, FormSlot::Bulk);
        }
        model_combo(ui, "bulk-model", &mut self.bulk.model);

        let submit = ui
            .add_enabled(!self.bulk.in_flight, egui::Button::new("Analiz Et"))
            .clicked();
        loading_row(ui, self.bulk.in_flight);

        if submit {
            match &self.bulk.file.path {
                None => self.alert = Some("Lütfen bir CSV dosyası seçin.".to_string()),
                Some(path) => {
                    self.bulk.response = None;
                    self.bulk.error = None;
                    self.bulk.in_flight = true;
                    self.backend.submit(BackendRequest::PredictBulk {
                        csv_path: path.clone(),
                        model: self.bulk.model,
                    });
                }
            }
        }

        self.draw_bulk_results(ui);
    }

    fn draw_playground_form(&mut self, ui: &mut egui::Ui) {
        let picked = file_picker_row(ui, "playground-file", &self.playground.file);
        if let Some(pick) = picked {
            self.apply_file_pick(pick, FormSlot::Playground);
        }
        model_combo(ui, "playground-model", &mut self.playground.model);

        egui::ComboBox::from_id_salt("playground-goal")
            .selected_text(self.playground.goal.to_string())
            .show_ui(ui, |ui| {
                for goal in OptimizationGoal::iter() {
                    ui.selectable_value(&mut self.playground.goal, goal, goal.to_string());
                }
            });

        let submit = ui
            .add_enabled(!self.playground.in_flight, egui::Button::new("Öneri Al"))
            .clicked();
        loading_row(ui, self.playground.in_flight);

        if submit {
            self.submit_playground();
        }

        self.draw_playground_results(ui);
    }

    fn submit_playground(&mut self) {
        let Some(snapshot) = self.board.snapshot() else {
            self.alert = Some("Lütfen en az bir raf ekleyin ve konumlandırın.".to_string());
            return;
        };
        let Some(path) = self.playground.file.path.clone() else {
            self.alert =
                Some("Lütfen sipariş verilerini içeren bir CSV dosyası seçin.".to_string());
            return;
        };

        self.playground.submitted_order = snapshot.iter().map(|s| s.name.clone()).collect();
        self.playground.response = None;
        self.playground.error = None;
        self.playground.in_flight = true;
        self.backend.submit(BackendRequest::Playground {
            cabinets: snapshot.iter().map(|s| s.to_cabinet()).collect(),
            csv_path: path,
            model: self.playground.model,
            goal: self.playground.goal,
        });
    }

    fn apply_file_pick(&mut self, path: PathBuf, slot: FormSlot) {
        let file = match slot {
            FormSlot::Bulk => &mut self.bulk.file,
            FormSlot::Playground => &mut self.playground.file,
        };
        match preview_orders_file(&path) {
            Ok(preview) => {
                file.path = Some(path);
                file.preview = Some(preview);
            }
            Err(e) => {
                warn!("rejected order file '{}': {e}", path.display());
                file.path = None;
                file.preview = None;
                self.alert = Some(format!("Dosya okunamadı: {e}"));
            }
        }
    }
}

enum FormSlot {
    Bulk,
    Playground,
}

fn model_combo(ui: &mut egui::Ui, id: &str, model: &mut ModelChoice) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(model.to_string())
        .show_ui(ui, |ui| {
            for choice in ModelChoice::iter() {
                ui.selectable_value(model, choice, choice.to_string());
            }
        });
}

/// File picker button plus the current pick's preview; returns a freshly
/// chosen path, if any.
fn file_picker_row(ui: &mut egui::Ui, id: &str, file: &OrderFilePick) -> Option<PathBuf> {
    let mut picked = None;
    ui.push_id(id, |ui| {
        ui.horizontal(|ui| {
            if ui.button("📂 CSV Seç").clicked() {
                picked = rfd::FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .pick_file();
            }
            match &file.path {
                Some(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    ui.label(name);
                }
                None => {
                    ui.label(RichText::new("Dosya seçilmedi").weak());
                }
            }
        });
        if let Some(preview) = &file.preview {
            ui.label(RichText::new(preview.summary()).small());
            for row in &preview.sample {
                ui.label(RichText::new(format!("  {}", row.join(", "))).small().weak());
            }
        }
    });
    picked
}

fn loading_row(ui: &mut egui::Ui, in_flight: bool) {
    if in_flight {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Yükleniyor...");
        });
    }
}
