//! Renderers for backend responses: prediction outcomes, receipt cards,
//! association rule cards and the playground recommendation list. These
//! only read the stored responses; nothing here mutates them.

use egui::{Color32, RichText, Stroke};

use shelf_core::api::{AssociationRule, ReceiptLine};
use shelf_core::palette::ConfidenceTier;
use shelf_core::text::{receipt_tag, title_case};

use crate::app::{MainTab, PlannerApp};
use crate::style::color32;

impl PlannerApp {
    pub fn draw_predict_result(&mut self, ui: &mut egui::Ui) {
        if let Some(result) = &self.predict.result {
            ui.label(
                RichText::new(format!("Tahmin Edilen Kategori: {result}"))
                    .color(Color32::from_rgb(0x28, 0xa7, 0x45))
                    .strong(),
            );
        }
        if let Some(error) = &self.predict.error {
            ui.label(
                RichText::new(format!("Tahmin Hatası: {error}"))
                    .color(Color32::from_rgb(0xdc, 0x35, 0x45)),
            );
        }
    }

    pub fn draw_bulk_results(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.bulk.error {
            error_label(ui, error);
            return;
        }
        let Some(response) = &self.bulk.response else {
            return;
        };

        if response.results.is_empty() {
            ui.label("Tahmin edilecek ürün bulunamadı.");
        } else {
            egui::ScrollArea::horizontal()
                .id_salt("bulk-receipts")
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        for (receipt_id, lines) in &response.results {
                            draw_receipt_card(ui, receipt_id, lines);
                        }
                    });
                });
        }

        // The association panel only appears when the analysis block exists
        if let Some(assoc) = &response.association_analysis {
            ui.separator();
            ui.label(RichText::new("Birliktelik Analizi").strong());
            if let Some(message) = &assoc.message {
                ui.label(RichText::new(message.as_str()).italics().weak());
            } else if let Some(rules) = assoc
                .rules_for_display
                .as_ref()
                .filter(|rules| !rules.is_empty())
            {
                for (index, rule) in rules.iter().enumerate() {
                    draw_rule_card(ui, index + 1, rule);
                }
                ui.add_space(4.0);
                ui.label(format!(
                    "Analiz edilen sipariş: {}",
                    assoc.total_transactions.unwrap_or(0)
                ));
                ui.label(format!(
                    "Minimum destek değeri: {}",
                    assoc
                        .min_support_used
                        .map(|v| format!("{v:.3}"))
                        .unwrap_or_else(|| "N/A".to_string())
                ));
                ui.label(format!(
                    "Bulunan pozitif kural (Lift > 1): {}",
                    assoc.total_positive_rules_found.unwrap_or(0)
                ));
            } else {
                ui.label(
                    RichText::new("Gösterilecek birliktelik kuralı bulunamadı.")
                        .italics()
                        .weak(),
                );
            }
        }
    }

    pub fn draw_playground_results(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.playground.error {
            error_label(ui, error);
            return;
        }
        let Some(response) = self.playground.response.clone() else {
            return;
        };

        ui.label(RichText::new("Önerilen Kategoriler").strong());
        if response.recommendations.is_empty() {
            ui.label("Öneri bulunamadı.");
        } else {
            // Render in the order the shelves were laid out, not the order
            // the backend returned
            for name in &self.playground.submitted_order {
                if let Some(category) = response.recommendations.get(name) {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(name.as_str()).strong());
                        ui.label("→");
                        ui.label(title_case(category));
                    });
                }
            }

            if ui.button("Raflara Uygula").clicked() {
                let applied = self.board.apply_recommendations(&response.recommendations);
                if applied == 0 {
                    self.set_status("Önerilerle eşleşen raf bulunamadı".to_string());
                } else {
                    self.set_status(format!("{applied} rafa kategori uygulandı"));
                }
            }
        }

        if let Some(info) = &response.unassigned_info {
            if let Some(message) = &info.message {
                ui.add_space(4.0);
                ui.label(RichText::new(message.as_str()).italics());
                if let Some(unassigned) = info
                    .unassigned_cabinets
                    .as_ref()
                    .filter(|list| !list.is_empty())
                {
                    ui.label(format!("Atanamayan Raflar: {}", unassigned.join(", ")));
                }
            }
        }

        if let Some(summary) = &response.association_analysis_summary {
            ui.add_space(4.0);
            ui.label(format!(
                "Toplam {} sipariş analiz edildi. Min. Destek: {}. Bulunan Kural Sayısı (Lift > 1): {}.",
                summary.total_transactions.unwrap_or(0),
                summary
                    .min_support_used
                    .map(|v| format!("{v:.3}"))
                    .unwrap_or_else(|| "N/A".to_string()),
                summary.total_positive_rules_found.unwrap_or(0)
            ));

            match summary
                .top_rules_for_display
                .as_ref()
                .filter(|rules| !rules.is_empty())
            {
                Some(rules) => {
                    ui.label(RichText::new("Gösterilen İlk Kurallar (Lift > 1):").strong());
                    for (index, rule) in rules.iter().enumerate() {
                        draw_rule_card(ui, index + 1, rule);
                    }
                }
                None => {
                    ui.label(RichText::new("Gösterilecek ilişki kuralı bulunamadı.").weak());
                }
            }
        }

        if response.visualization_data.is_some()
            && ui.button("📊 Görselleştirmeyi Aç").clicked()
        {
            self.main_tab = MainTab::Visualization;
        }
    }
}

fn draw_receipt_card(ui: &mut egui::Ui, receipt_id: &str, lines: &[ReceiptLine]) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_gray(248))
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(RichText::new("Fiş").strong());
                ui.separator();
                for line in lines {
                    match line {
                        ReceiptLine::Prediction { product, category } => {
                            ui.label(format!("{} — {}", product, title_case(category)));
                        }
                        ReceiptLine::Error { error } => {
                            ui.label(
                                RichText::new(error.as_str())
                                    .color(Color32::from_rgb(0xdc, 0x35, 0x45)),
                            );
                        }
                    }
                }
                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(receipt_tag(receipt_id)).weak());
                });
            });
        });
}

fn draw_rule_card(ui: &mut egui::Ui, number: usize, rule: &AssociationRule) {
    let tier = ConfidenceTier::of(rule.confidence);
    let accent = color32(tier.accent());

    egui::Frame::group(ui.style())
        .stroke(Stroke::new(1.5, accent))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("#{number}")).weak());
                ui.label(RichText::new(tier.to_string()).color(accent).small());
            });
            let if_cats = joined_titles(&rule.if_categories);
            let then_cats = joined_titles(&rule.then_categories);
            ui.label(format!("Eğer {if_cats} kategorisinden alınırsa,"));
            ui.label(format!("{then_cats} kategorisinden alınır."));
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("Destek: {:.3}", rule.support)).small());
                ui.label(RichText::new(format!("Güven: {:.3}", rule.confidence)).small());
                ui.label(RichText::new(format!("Lift: {:.2}", rule.lift)).small());
            });
        });
}

fn joined_titles(categories: &[String]) -> String {
    categories
        .iter()
        .map(|c| title_case(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.label(
        RichText::new(format!("Hata: {message}")).color(Color32::from_rgb(0xdc, 0x35, 0x45)),
    );
}
