//! View models for the visualization panels.
//!
//! Everything here is computed from the backend payload and a container
//! size; no drawing happens in this crate. The GUI paints the returned
//! nodes, edges, bars and cells and feeds clicks back into the detail
//! lookups at the bottom of this module.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::api::{CategoryRelation, OptimizationGoal, ShelfGroup, VisualizationPayload};
use crate::constants::{
    DIST_FADE_MAX, DIST_FADE_MIN, HUE_MAXIMIZE, HUE_MINIMIZE_EVEN, HUE_MINIMIZE_ODD, MAP_MARGIN,
    RANK_LIGHTNESS_BASE, RANK_LIGHTNESS_MAX, RANK_LIGHTNESS_STEP,
};
use crate::geometry::{LinearScale, Vec2f, euclidean};
use crate::palette::{RelationTier, Rgb, hsl_to_rgb, rank_lightness};

/// One shelf node on the map, already normalized into container pixels
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub shelf: String,
    pub category: Option<String>,
    pub center: Vec2f,
    /// Rank-derived fill; `None` when the backend supplied no rank
    pub color: Option<Rgb>,
    pub rank: Option<u32>,
}

/// Label drawn at an edge midpoint, only for lifts above 1
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub text: String,
    pub mark: SeparationMark,
}

/// Visual cue on minimize-mode edge labels: did the optimizer manage to
/// pull this related pair apart?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparationMark {
    None,
    Separated,
    TooClose,
}

/// One relation edge between two shelf nodes
#[derive(Debug, Clone, PartialEq)]
pub struct MapEdge {
    pub from: String,
    pub to: String,
    pub a: Vec2f,
    pub b: Vec2f,
    pub lift: f64,
    pub distance: f32,
    pub tier: RelationTier,
    pub width: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub dashed: bool,
    pub label: Option<EdgeLabel>,
}

/// The shelf map panel: normalized nodes plus relation edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelfMapView {
    pub nodes: Vec<MapNode>,
    pub edges: Vec<MapEdge>,
}

impl ShelfMapView {
    pub fn build(payload: &VisualizationPayload, container: Vec2f) -> Self {
        let scale = LinearScale::from_points(
            payload.shelf_positions.values().copied(),
            container,
            MAP_MARGIN,
        );
        let minimize = payload.optimization_type == OptimizationGoal::Minimize;

        let mut nodes = Vec::with_capacity(payload.shelf_positions.len());
        for (shelf, pos) in payload
            .shelf_positions
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
        {
            let assignment = payload.assignment_explanation.get(shelf);
            let rank = assignment.and_then(|a| a.rank);
            let color = rank.map(|rank| {
                let lightness = rank_lightness(rank);
                if minimize {
                    let hue = match assignment.and_then(|a| a.group) {
                        Some(ShelfGroup::Even) => HUE_MINIMIZE_EVEN,
                        _ => HUE_MINIMIZE_ODD,
                    };
                    hsl_to_rgb(hue, 70.0, lightness)
                } else {
                    hsl_to_rgb(HUE_MAXIMIZE, 100.0, lightness)
                }
            });
            nodes.push(MapNode {
                shelf: shelf.clone(),
                category: assignment.and_then(|a| a.category.clone()),
                center: scale.apply(*pos),
                color,
                rank,
            });
        }

        let mut edges = Vec::new();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let Some((lift, _)) = relation_between(payload, a, b) else {
                    continue;
                };
                let distance = shelf_distance(payload, &a.shelf, &b.shelf)
                    .unwrap_or_else(|| euclidean(a.center, b.center));

                let tier = RelationTier::of(lift);
                let (color, base_opacity) = if minimize {
                    tier.edge_style_minimize()
                } else {
                    tier.edge_style_maximize()
                };
                // Minimize mode fades edges by distance: a long edge between
                // related categories means the separation worked.
                let opacity = if minimize {
                    let d = distance.clamp(DIST_FADE_MIN, DIST_FADE_MAX);
                    (DIST_FADE_MAX - d) / (DIST_FADE_MAX - DIST_FADE_MIN)
                } else {
                    base_opacity
                };

                let label = (lift > 1.0).then(|| {
                    if minimize {
                        let mark = if distance > 200.0 && lift > 1.5 {
                            SeparationMark::Separated
                        } else if distance < 100.0 && lift > 1.5 {
                            SeparationMark::TooClose
                        } else {
                            SeparationMark::None
                        };
                        EdgeLabel {
                            text: format!("{:.1} / {:.0}", lift, distance),
                            mark,
                        }
                    } else {
                        EdgeLabel {
                            text: format!("{:.1}", lift),
                            mark: SeparationMark::None,
                        }
                    }
                });

                edges.push(MapEdge {
                    from: a.shelf.clone(),
                    to: b.shelf.clone(),
                    a: a.center,
                    b: b.center,
                    lift,
                    distance,
                    tier,
                    width: tier.edge_width(),
                    color,
                    opacity,
                    dashed: minimize,
                    label,
                });
            }
        }

        Self { nodes, edges }
    }
}

/// Directed relation lookup between the categories assigned to two nodes,
/// trying both directions. Only positive lifts count as related.
fn relation_between(
    payload: &VisualizationPayload,
    a: &MapNode,
    b: &MapNode,
) -> Option<(f64, f64)> {
    let cat_a = a.category.as_deref()?;
    let cat_b = b.category.as_deref()?;
    find_relation(payload, cat_a, cat_b)
        .or_else(|| find_relation(payload, cat_b, cat_a))
        .filter(|(lift, _)| *lift > 0.0)
}

fn find_relation(payload: &VisualizationPayload, from: &str, to: &str) -> Option<(f64, f64)> {
    payload
        .category_relations
        .get(from)?
        .iter()
        .find(|rel| rel.category == to)
        .map(|rel| (rel.lift, rel.confidence))
}

fn shelf_distance(payload: &VisualizationPayload, a: &str, b: &str) -> Option<f32> {
    payload
        .all_shelf_distances
        .get(a)
        .and_then(|m| m.get(b))
        .or_else(|| payload.all_shelf_distances.get(b).and_then(|m| m.get(a)))
        .copied()
}

/// One horizontal bar of the category score chart
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub category: String,
    pub score: f64,
    /// Width relative to the best score, in 0..=1
    pub fraction: f32,
    pub color: Rgb,
    /// 1-based position in the descending order
    pub rank: usize,
}

/// Bars sorted descending by score; lightness grows down the ranking.
pub fn score_bars(payload: &VisualizationPayload) -> Vec<ScoreBar> {
    let sorted: Vec<(&String, &f64)> = payload
        .category_scores
        .iter()
        .sorted_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .collect();

    let max_score = sorted.first().map(|(_, s)| **s).unwrap_or(1.0);
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, (category, score))| {
            let lightness = (RANK_LIGHTNESS_BASE + index as f32 * RANK_LIGHTNESS_STEP)
                .min(RANK_LIGHTNESS_MAX);
            ScoreBar {
                category: category.clone(),
                score: *score,
                fraction: if max_score > 0.0 {
                    (*score / max_score) as f32
                } else {
                    0.0
                },
                color: hsl_to_rgb(HUE_MAXIMIZE, 100.0, lightness),
                rank: index + 1,
            }
        })
        .collect()
}

/// Square lift matrix over every category appearing in any relation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationMatrix {
    pub categories: Vec<String>,
    cells: Vec<Option<f64>>,
}

impl RelationMatrix {
    pub fn build(payload: &VisualizationPayload) -> Self {
        let mut all: BTreeSet<&String> = BTreeSet::new();
        for (category, relations) in &payload.category_relations {
            all.insert(category);
            for rel in relations {
                all.insert(&rel.category);
            }
        }

        let categories: Vec<String> = all
            .into_iter()
            .sorted_by(|a, b| {
                let score_a = payload.category_scores.get(*a).copied().unwrap_or(0.0);
                let score_b = payload.category_scores.get(*b).copied().unwrap_or(0.0);
                score_b.total_cmp(&score_a).then_with(|| a.cmp(b))
            })
            .cloned()
            .collect();

        let n = categories.len();
        let mut cells = vec![None; n * n];
        for (row, from) in categories.iter().enumerate() {
            for (col, to) in categories.iter().enumerate() {
                if row == col {
                    continue;
                }
                cells[row * n + col] = find_relation(payload, from, to)
                    .map(|(lift, _)| lift)
                    .filter(|lift| *lift > 0.0);
            }
        }

        Self { categories, cells }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Lift at an off-diagonal cell; the diagonal is always `None`.
    pub fn lift(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row * self.len() + col).copied().flatten()
    }
}

/// Detail panel content for a clicked shelf node
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfDetail {
    pub shelf: String,
    pub category: Option<String>,
    pub reason: Option<String>,
    pub score: f64,
    pub rank: Option<u32>,
    /// The assigned category's relations, strongest first
    pub relations: Vec<CategoryRelation>,
}

pub fn shelf_detail(payload: &VisualizationPayload, shelf: &str) -> Option<ShelfDetail> {
    let assignment = payload.assignment_explanation.get(shelf)?;
    let relations = assignment
        .category
        .as_deref()
        .and_then(|cat| payload.category_relations.get(cat))
        .map(|rels| sorted_by_lift(rels))
        .unwrap_or_default();

    Some(ShelfDetail {
        shelf: shelf.to_string(),
        category: assignment.category.clone(),
        reason: assignment.reason.clone(),
        score: assignment.score.unwrap_or(0.0),
        rank: assignment.rank,
        relations,
    })
}

/// One related category row in a category detail, with the shelf the
/// related category ended up on (if any)
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedCategory {
    pub relation: CategoryRelation,
    pub shelf: Option<String>,
}

/// Detail panel content for a clicked score bar
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: String,
    pub score: f64,
    /// 1-based position in the descending score order
    pub rank: usize,
    pub assigned_shelf: Option<String>,
    pub relations: Vec<RelatedCategory>,
}

pub fn category_detail(payload: &VisualizationPayload, category: &str) -> CategoryDetail {
    let score = payload.category_scores.get(category).copied().unwrap_or(0.0);
    let rank = score_bars(payload)
        .iter()
        .position(|bar| bar.category == category)
        .map(|i| i + 1)
        .unwrap_or(0);

    let relations = payload
        .category_relations
        .get(category)
        .map(|rels| sorted_by_lift(rels))
        .unwrap_or_default()
        .into_iter()
        .map(|relation| {
            let shelf = shelf_assigned_to(payload, &relation.category);
            RelatedCategory { relation, shelf }
        })
        .collect();

    CategoryDetail {
        category: category.to_string(),
        score,
        rank,
        assigned_shelf: shelf_assigned_to(payload, category),
        relations,
    }
}

/// How well a related pair's placement matches the optimization goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementVerdict {
    Achieved,
    Violated,
    Partial,
}

/// Detail panel content for a clicked matrix cell
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDetail {
    pub from: String,
    pub to: String,
    pub lift: f64,
    pub confidence: f64,
    pub tier: RelationTier,
    pub shelves: Option<(String, String)>,
    pub distance: Option<f32>,
    pub verdict: Option<PlacementVerdict>,
}

pub fn relation_detail(
    payload: &VisualizationPayload,
    from: &str,
    to: &str,
) -> Option<RelationDetail> {
    let (lift, confidence) = find_relation(payload, from, to)?;

    let shelves = match (shelf_assigned_to(payload, from), shelf_assigned_to(payload, to)) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => None,
    };
    let distance = shelves
        .as_ref()
        .and_then(|(a, b)| shelf_distance(payload, a, b));

    // Close pairs fulfill a maximize goal and violate a minimize goal;
    // distant pairs the other way around. Weak relations stay neutral.
    let verdict = distance.map(|d| {
        let close = d < 100.0 && lift > 1.5;
        let far = d > 200.0 && lift > 1.5;
        match payload.optimization_type {
            OptimizationGoal::Maximize if close => PlacementVerdict::Achieved,
            OptimizationGoal::Maximize if far => PlacementVerdict::Violated,
            OptimizationGoal::Minimize if far => PlacementVerdict::Achieved,
            OptimizationGoal::Minimize if close => PlacementVerdict::Violated,
            _ => PlacementVerdict::Partial,
        }
    });

    Some(RelationDetail {
        from: from.to_string(),
        to: to.to_string(),
        lift,
        confidence,
        tier: RelationTier::of(lift),
        shelves,
        distance,
        verdict,
    })
}

fn sorted_by_lift(relations: &[CategoryRelation]) -> Vec<CategoryRelation> {
    relations
        .iter()
        .cloned()
        .sorted_by(|a, b| b.lift.total_cmp(&a.lift))
        .collect()
}

/// First shelf (by name) whose assignment carries the given category.
fn shelf_assigned_to(payload: &VisualizationPayload, category: &str) -> Option<String> {
    payload
        .assignment_explanation
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .find(|(_, a)| a.category.as_deref() == Some(category))
        .map(|(shelf, _)| shelf.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Assignment;
    use std::collections::HashMap;

    fn test_payload(goal: OptimizationGoal) -> VisualizationPayload {
        let mut shelf_positions = HashMap::new();
        shelf_positions.insert("Raf 1".to_string(), Vec2f::new(0.0, 0.0));
        shelf_positions.insert("Raf 2".to_string(), Vec2f::new(300.0, 0.0));

        let mut distances_1 = HashMap::new();
        distances_1.insert("Raf 2".to_string(), 300.0);
        let mut all_shelf_distances = HashMap::new();
        all_shelf_distances.insert("Raf 1".to_string(), distances_1);

        let mut category_scores = HashMap::new();
        category_scores.insert("süt ürünleri".to_string(), 4.2);
        category_scores.insert("kahvaltılık".to_string(), 3.1);

        let mut category_relations = HashMap::new();
        category_relations.insert(
            "süt ürünleri".to_string(),
            vec![CategoryRelation {
                category: "kahvaltılık".to_string(),
                lift: 2.5,
                confidence: 0.8,
            }],
        );

        let mut assignment_explanation = HashMap::new();
        assignment_explanation.insert(
            "Raf 1".to_string(),
            Assignment {
                category: Some("süt ürünleri".to_string()),
                reason: Some("Yüksek puan".to_string()),
                score: Some(4.2),
                rank: Some(1),
                group: Some(ShelfGroup::Even),
            },
        );
        assignment_explanation.insert(
            "Raf 2".to_string(),
            Assignment {
                category: Some("kahvaltılık".to_string()),
                reason: None,
                score: Some(3.1),
                rank: Some(2),
                group: Some(ShelfGroup::Odd),
            },
        );

        VisualizationPayload {
            shelf_positions,
            all_shelf_distances,
            category_scores,
            category_relations,
            assignment_explanation,
            optimization_type: goal,
        }
    }

    const CONTAINER: Vec2f = Vec2f::new(760.0, 460.0);

    #[test]
    fn test_map_nodes_are_normalized_and_sorted() {
        let view = ShelfMapView::build(&test_payload(OptimizationGoal::Maximize), CONTAINER);
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.nodes[0].shelf, "Raf 1");
        // Extremes land on the margins
        assert!((view.nodes[0].center.x - 30.0).abs() < 1e-3);
        assert!((view.nodes[1].center.x - 730.0).abs() < 1e-3);
        assert_eq!(view.nodes[0].rank, Some(1));
    }

    #[test]
    fn test_maximize_edge_uses_tier_style() {
        let view = ShelfMapView::build(&test_payload(OptimizationGoal::Maximize), CONTAINER);
        assert_eq!(view.edges.len(), 1);
        let edge = &view.edges[0];
        assert_eq!(edge.tier, RelationTier::Strong);
        assert_eq!(edge.width, 3.0);
        assert_eq!(edge.color, Rgb::new(92, 184, 92));
        assert!((edge.opacity - 0.6).abs() < 1e-6);
        assert!(!edge.dashed);
        assert_eq!(edge.label.as_ref().unwrap().text, "2.5");
    }

    #[test]
    fn test_minimize_edge_fades_with_distance() {
        // lift 2.5 at distance 300: strong tier, opacity (400-300)/350
        let view = ShelfMapView::build(&test_payload(OptimizationGoal::Minimize), CONTAINER);
        let edge = &view.edges[0];
        assert_eq!(edge.color, Rgb::new(255, 107, 107));
        assert!((edge.opacity - 100.0 / 350.0).abs() < 1e-4);
        assert!(edge.dashed);

        let label = edge.label.as_ref().unwrap();
        assert_eq!(label.text, "2.5 / 300");
        assert_eq!(label.mark, SeparationMark::Separated);
    }

    #[test]
    fn test_minimize_node_hues_split_by_group() {
        let view = ShelfMapView::build(&test_payload(OptimizationGoal::Minimize), CONTAINER);
        let even = view.nodes[0].color.unwrap();
        let odd = view.nodes[1].color.unwrap();
        assert_ne!(even, odd);
        // Even group is the red hue, odd the green one
        assert!(even.r > even.g);
        assert!(odd.g > odd.r);
    }

    #[test]
    fn test_unrelated_shelves_get_no_edge() {
        let mut payload = test_payload(OptimizationGoal::Maximize);
        payload.category_relations.clear();
        let view = ShelfMapView::build(&payload, CONTAINER);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_score_bars_sorted_descending() {
        let bars = score_bars(&test_payload(OptimizationGoal::Maximize));
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].category, "süt ürünleri");
        assert_eq!(bars[0].rank, 1);
        assert!((bars[0].fraction - 1.0).abs() < 1e-6);
        assert!((bars[1].fraction - (3.1 / 4.2) as f32).abs() < 1e-4);
        // The top bar is darker than the runner-up
        assert!(bars[0].color != bars[1].color);
    }

    #[test]
    fn test_matrix_orders_by_score_and_blanks_diagonal() {
        let matrix = RelationMatrix::build(&test_payload(OptimizationGoal::Maximize));
        assert_eq!(matrix.categories, vec!["süt ürünleri", "kahvaltılık"]);
        assert_eq!(matrix.lift(0, 0), None);
        assert_eq!(matrix.lift(0, 1), Some(2.5));
        // The reverse direction has no mined rule
        assert_eq!(matrix.lift(1, 0), None);
    }

    #[test]
    fn test_shelf_detail_sorts_relations() {
        let mut payload = test_payload(OptimizationGoal::Maximize);
        payload
            .category_relations
            .get_mut("süt ürünleri")
            .unwrap()
            .push(CategoryRelation {
                category: "içecek".to_string(),
                lift: 3.4,
                confidence: 0.6,
            });

        let detail = shelf_detail(&payload, "Raf 1").unwrap();
        assert_eq!(detail.category.as_deref(), Some("süt ürünleri"));
        assert_eq!(detail.relations[0].category, "içecek");
        assert_eq!(detail.relations[1].category, "kahvaltılık");
        assert!(shelf_detail(&payload, "Depo").is_none());
    }

    #[test]
    fn test_category_detail_finds_assigned_shelves() {
        let detail = category_detail(&test_payload(OptimizationGoal::Maximize), "süt ürünleri");
        assert_eq!(detail.rank, 1);
        assert_eq!(detail.assigned_shelf.as_deref(), Some("Raf 1"));
        assert_eq!(detail.relations.len(), 1);
        assert_eq!(detail.relations[0].shelf.as_deref(), Some("Raf 2"));
    }

    #[test]
    fn test_relation_detail_verdict_follows_goal() {
        // 300 px apart: a failure when maximizing, a win when minimizing
        let detail = relation_detail(
            &test_payload(OptimizationGoal::Maximize),
            "süt ürünleri",
            "kahvaltılık",
        )
        .unwrap();
        assert_eq!(detail.lift, 2.5);
        assert_eq!(detail.distance, Some(300.0));
        assert_eq!(detail.verdict, Some(PlacementVerdict::Violated));

        let detail = relation_detail(
            &test_payload(OptimizationGoal::Minimize),
            "süt ürünleri",
            "kahvaltılık",
        )
        .unwrap();
        assert_eq!(detail.verdict, Some(PlacementVerdict::Achieved));

        assert!(relation_detail(
            &test_payload(OptimizationGoal::Maximize),
            "kahvaltılık",
            "süt ürünleri"
        )
        .is_none());
    }
}
