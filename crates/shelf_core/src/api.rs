//! Wire types for the recommendation backend.
//!
//! Field names follow the backend's JSON responses verbatim; unknown fields
//! are ignored so the client stays compatible with additive server changes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::geometry::Vec2f;

/// Prediction model selector, as accepted by the backend
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelChoice {
    #[default]
    #[strum(serialize = "Naive Bayes")]
    NaiveBayes,
    #[strum(serialize = "Karar Ağacı")]
    DecisionTree,
    #[strum(serialize = "Lojistik Regresyon")]
    LogisticRegression,
}

impl ModelChoice {
    /// Form field value (`model_choice`)
    pub fn as_wire(&self) -> &'static str {
        match self {
            ModelChoice::NaiveBayes => "naive_bayes",
            ModelChoice::DecisionTree => "decision_tree",
            ModelChoice::LogisticRegression => "logistic_regression",
        }
    }
}

/// Backend placement strategy: related categories close together or apart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationGoal {
    #[default]
    #[strum(serialize = "İlişkili kategoriler yakın (maximize)")]
    Maximize,
    #[strum(serialize = "İlişkili kategoriler uzak (minimize)")]
    Minimize,
}

impl OptimizationGoal {
    /// Form field value (`time_goal`)
    pub fn as_wire(&self) -> &'static str {
        match self {
            OptimizationGoal::Maximize => "maximize",
            OptimizationGoal::Minimize => "minimize",
        }
    }
}

/// `POST /predict` body
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub product_name: String,
    pub model_choice: ModelChoice,
}

/// `POST /predict` response
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub prediction: Option<String>,
    pub error: Option<String>,
}

/// One line of a receipt in the bulk response: either a prediction or a
/// per-receipt failure message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReceiptLine {
    Prediction { product: String, category: String },
    Error { error: String },
}

/// Association rule as mined by the backend, read-only on this side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssociationRule {
    pub if_categories: Vec<String>,
    pub then_categories: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

/// Association analysis block shared by the bulk and playground responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociationAnalysis {
    pub message: Option<String>,
    pub rules_for_display: Option<Vec<AssociationRule>>,
    pub total_transactions: Option<u64>,
    pub min_support_used: Option<f64>,
    pub total_positive_rules_found: Option<u64>,
}

/// `POST /predict_bulk` response.
///
/// Receipt ids are zero-padded (`Siparis_01`), so the ordered map matches
/// the original file order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub results: BTreeMap<String, Vec<ReceiptLine>>,
    pub association_analysis: Option<AssociationAnalysis>,
    pub error: Option<String>,
}

/// Shelf entry of the `cabinets` form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetPayload {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnassignedInfo {
    pub message: Option<String>,
    pub unassigned_cabinets: Option<Vec<String>>,
}

/// Summary block of the playground response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociationSummary {
    pub total_transactions: Option<u64>,
    pub min_support_used: Option<f64>,
    pub total_positive_rules_found: Option<u64>,
    pub top_rules_for_display: Option<Vec<AssociationRule>>,
}

/// Minimize-mode shelf group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfGroup {
    Even,
    Odd,
}

/// Why a shelf got its category, as explained by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Assignment {
    pub category: Option<String>,
    pub reason: Option<String>,
    pub score: Option<f64>,
    pub rank: Option<u32>,
    pub group: Option<ShelfGroup>,
}

/// Directed relation from one category to another
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRelation {
    pub category: String,
    pub lift: f64,
    pub confidence: f64,
}

/// Everything the visualization panels need, entirely backend supplied
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualizationPayload {
    #[serde(default)]
    pub shelf_positions: HashMap<String, Vec2f>,
    #[serde(default)]
    pub all_shelf_distances: HashMap<String, HashMap<String, f32>>,
    #[serde(default)]
    pub category_scores: HashMap<String, f64>,
    #[serde(default)]
    pub category_relations: HashMap<String, Vec<CategoryRelation>>,
    #[serde(default)]
    pub assignment_explanation: HashMap<String, Assignment>,
    #[serde(default)]
    pub optimization_type: OptimizationGoal,
}

/// `POST /playground_recommend` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaygroundResponse {
    #[serde(default)]
    pub recommendations: HashMap<String, String>,
    pub unassigned_info: Option<UnassignedInfo>,
    pub association_analysis_summary: Option<AssociationSummary>,
    pub visualization_data: Option<VisualizationPayload>,
    pub error: Option<String>,
    /// Present on error payloads when the analysis itself produced a note
    pub association_analysis: Option<AssociationAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_line_untagged() {
        let line: ReceiptLine =
            serde_json::from_str(r#"{"product": "tam yağlı süt", "category": "süt ürünleri"}"#)
                .unwrap();
        assert_eq!(
            line,
            ReceiptLine::Prediction {
                product: "tam yağlı süt".to_string(),
                category: "süt ürünleri".to_string(),
            }
        );

        let line: ReceiptLine =
            serde_json::from_str(r#"{"error": "Tahmin başarısız oldu"}"#).unwrap();
        assert_eq!(
            line,
            ReceiptLine::Error {
                error: "Tahmin başarısız oldu".to_string(),
            }
        );
    }

    #[test]
    fn test_bulk_response_orders_receipts() {
        let body = r#"{
            "results": {
                "Siparis_02": [{"product": "ekmek", "category": "fırın"}],
                "Siparis_01": [{"product": "süt", "category": "süt ürünleri"}]
            }
        }"#;
        let resp: BulkResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<&str> = resp.results.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["Siparis_01", "Siparis_02"]);
        assert!(resp.association_analysis.is_none());
    }

    #[test]
    fn test_model_choice_wire_roundtrip() {
        let json = serde_json::to_string(&ModelChoice::DecisionTree).unwrap();
        assert_eq!(json, r#""decision_tree""#);
        assert_eq!(ModelChoice::DecisionTree.as_wire(), "decision_tree");
    }

    #[test]
    fn test_visualization_payload_decodes() {
        let body = r#"{
            "shelf_positions": {"Raf 1": {"x": 10.0, "y": 20.0}},
            "all_shelf_distances": {"Raf 1": {"Raf 2": 300.0}},
            "category_scores": {"süt ürünleri": 4.2},
            "category_relations": {
                "süt ürünleri": [{"category": "kahvaltılık", "lift": 2.5, "confidence": 0.8}]
            },
            "assignment_explanation": {
                "Raf 1": {"category": "süt ürünleri", "reason": "Yüksek ilişki puanı",
                          "score": 4.2, "rank": 1, "group": "even"}
            },
            "optimization_type": "minimize"
        }"#;
        let viz: VisualizationPayload = serde_json::from_str(body).unwrap();
        assert_eq!(viz.optimization_type, OptimizationGoal::Minimize);
        assert_eq!(viz.shelf_positions["Raf 1"], Vec2f::new(10.0, 20.0));
        let assign = &viz.assignment_explanation["Raf 1"];
        assert_eq!(assign.rank, Some(1));
        assert_eq!(assign.group, Some(ShelfGroup::Even));
    }
}
