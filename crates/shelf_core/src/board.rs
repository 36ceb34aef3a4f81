use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::CabinetPayload;
use crate::constants::{
    CASCADE_COLUMNS, CASCADE_MARGIN, CASCADE_STEP_X, CASCADE_STEP_Y, DEFAULT_SHELF_H,
    DEFAULT_SHELF_W, PALETTE_LEN,
};
use crate::geometry::{Vec2f, clamp_position, clamp_size};
use crate::palette::theme_index_for_id;

/// A positioned, resizable, renameable rectangle representing a store shelf.
///
/// `display_category` is presentation-only: applying recommendations writes
/// it, but it never reaches the canonical state serialized for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: u32,
    pub name: String,
    pub pos: Vec2f,
    pub size: Vec2f,
    pub theme: usize,
    #[serde(default)]
    pub display_category: Option<String>,
}

impl Shelf {
    pub fn default_name(id: u32) -> String {
        format!("Raf {}", id)
    }
}

/// Snapshot row of the current layout, in creation order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfSnapshot {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ShelfSnapshot {
    /// Wire form of the snapshot (`cabinets` sends positions only)
    pub fn to_cabinet(&self) -> CabinetPayload {
        CabinetPayload {
            name: self.name.clone(),
            x: self.x,
            y: self.y,
        }
    }
}

/// Owns the live shelf set and the monotonic id counter.
///
/// Ids are never reused within a session; only `clear` resets the counter,
/// so the next shelf after a clear is `Raf 1` again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfBoard {
    shelves: Vec<Shelf>,
    next_id: u32,
}

impl ShelfBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shelf> {
        self.shelves.iter()
    }

    pub fn shelf(&self, id: u32) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.id == id)
    }

    pub fn shelf_mut(&mut self, id: u32) -> Option<&mut Shelf> {
        self.shelves.iter_mut().find(|s| s.id == id)
    }

    /// Creates a shelf with a fresh id, default size, cyclic palette entry
    /// and a cascading position clamped into the container.
    pub fn add_shelf(&mut self, container: Vec2f) -> &Shelf {
        self.next_id += 1;
        let id = self.next_id;

        let size = Vec2f::new(DEFAULT_SHELF_W, DEFAULT_SHELF_H);
        let pos = Vec2f::new(
            (id % CASCADE_COLUMNS) as f32 * CASCADE_STEP_X + CASCADE_MARGIN,
            (id / CASCADE_COLUMNS) as f32 * CASCADE_STEP_Y + CASCADE_MARGIN,
        );
        let shelf = Shelf {
            id,
            name: Shelf::default_name(id),
            pos: clamp_position(pos, size, container),
            size,
            theme: theme_index_for_id(id),
            display_category: None,
        };
        debug!("added shelf {} at ({}, {})", shelf.name, shelf.pos.x, shelf.pos.y);
        self.shelves.push(shelf);
        self.shelves.last().expect("just pushed")
    }

    /// Removes one shelf. The id counter is untouched, removed ids are
    /// never handed out again.
    pub fn remove_shelf(&mut self, id: u32) -> bool {
        let before = self.shelves.len();
        self.shelves.retain(|s| s.id != id);
        self.shelves.len() != before
    }

    /// Removes every shelf and resets the id counter to zero.
    pub fn clear(&mut self) {
        info!("clearing {} shelves", self.shelves.len());
        self.shelves.clear();
        self.next_id = 0;
    }

    /// Renames a shelf. A blank name after trimming keeps the current one.
    pub fn rename(&mut self, id: u32, new_name: &str) {
        if let Some(shelf) = self.shelf_mut(id) {
            let trimmed = new_name.trim();
            if !trimmed.is_empty() {
                shelf.name = trimmed.to_string();
            }
        }
    }

    /// Assigns a palette entry, clamping out-of-range indices into the
    /// closed palette instead of storing them verbatim.
    pub fn set_theme(&mut self, id: u32, theme: usize) {
        if let Some(shelf) = self.shelf_mut(id) {
            shelf.theme = theme.min(PALETTE_LEN - 1);
        }
    }

    /// Moves a shelf, keeping its bounding box inside the container.
    pub fn move_shelf(&mut self, id: u32, pos: Vec2f, container: Vec2f) {
        if let Some(shelf) = self.shelf_mut(id) {
            shelf.pos = clamp_position(pos, shelf.size, container);
        }
    }

    /// Resizes a shelf against the size floor, then re-clamps its position
    /// so growing near an edge cannot push it outside.
    pub fn resize_shelf(&mut self, id: u32, size: Vec2f, container: Vec2f) {
        if let Some(shelf) = self.shelf_mut(id) {
            shelf.size = clamp_size(size);
            shelf.pos = clamp_position(shelf.pos, shelf.size, container);
        }
    }

    /// Re-clamps every shelf after the container itself changed size.
    pub fn clamp_all(&mut self, container: Vec2f) {
        for shelf in &mut self.shelves {
            shelf.pos = clamp_position(shelf.pos, shelf.size, container);
        }
    }

    /// Ordered layout snapshot for submission; `None` when the board is
    /// empty (the caller raises the canonical alert).
    pub fn snapshot(&self) -> Option<Vec<ShelfSnapshot>> {
        if self.shelves.is_empty() {
            return None;
        }
        Some(
            self.shelves
                .iter()
                .map(|s| ShelfSnapshot {
                    name: s.name.clone(),
                    x: s.pos.x,
                    y: s.pos.y,
                    width: s.size.x,
                    height: s.size.y,
                })
                .collect(),
        )
    }

    /// Writes recommended categories into matching shelves' display labels
    /// and returns how many matched. Zero matches is a notice for the UI,
    /// not an error.
    pub fn apply_recommendations(&mut self, recommendations: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for shelf in &mut self.shelves {
            if let Some(category) = recommendations.get(&shelf.name) {
                shelf.display_category = Some(category.clone());
                applied += 1;
            }
        }
        info!(
            "applied recommendations to {}/{} shelves",
            applied,
            self.shelves.len()
        );
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Vec2f = Vec2f::new(800.0, 500.0);

    #[test]
    fn test_add_shelf_defaults() {
        let mut board = ShelfBoard::new();
        let shelf = board.add_shelf(CONTAINER);
        assert_eq!(shelf.id, 1);
        assert_eq!(shelf.name, "Raf 1");
        assert_eq!(shelf.size, Vec2f::new(DEFAULT_SHELF_W, DEFAULT_SHELF_H));
        assert_eq!(shelf.theme, 0);
        assert!(shelf.display_category.is_none());
    }

    #[test]
    fn test_ids_monotonic_across_removal() {
        let mut board = ShelfBoard::new();
        board.add_shelf(CONTAINER);
        board.add_shelf(CONTAINER);
        assert!(board.remove_shelf(2));
        let shelf = board.add_shelf(CONTAINER);
        assert_eq!(shelf.id, 3);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut board = ShelfBoard::new();
        for _ in 0..5 {
            board.add_shelf(CONTAINER);
        }
        board.clear();
        assert!(board.is_empty());
        let shelf = board.add_shelf(CONTAINER);
        assert_eq!(shelf.id, 1);
    }

    #[test]
    fn test_theme_cycles_over_palette() {
        let mut board = ShelfBoard::new();
        for _ in 0..9 {
            board.add_shelf(CONTAINER);
        }
        let themes: Vec<usize> = board.iter().map(|s| s.theme).collect();
        assert_eq!(themes, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }

    #[test]
    fn test_set_theme_clamps() {
        let mut board = ShelfBoard::new();
        let id = board.add_shelf(CONTAINER).id;
        board.set_theme(id, 99);
        assert_eq!(board.shelf(id).unwrap().theme, PALETTE_LEN - 1);
    }

    #[test]
    fn test_rename_keeps_name_on_blank() {
        let mut board = ShelfBoard::new();
        let id = board.add_shelf(CONTAINER).id;
        board.rename(id, "Kasa Yanı");
        assert_eq!(board.shelf(id).unwrap().name, "Kasa Yanı");
        board.rename(id, "   ");
        assert_eq!(board.shelf(id).unwrap().name, "Kasa Yanı");
    }

    #[test]
    fn test_snapshot_empty_is_none() {
        let board = ShelfBoard::new();
        assert!(board.snapshot().is_none());
    }

    #[test]
    fn test_snapshot_creation_order() {
        let mut board = ShelfBoard::new();
        board.add_shelf(CONTAINER);
        board.add_shelf(CONTAINER);
        board.rename(1, "Giriş");
        let snapshot = board.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "Giriş");
        assert_eq!(snapshot[1].name, "Raf 2");
        assert_eq!(snapshot[0].width, DEFAULT_SHELF_W);
    }

    #[test]
    fn test_move_clamps_into_container() {
        let mut board = ShelfBoard::new();
        let id = board.add_shelf(CONTAINER).id;
        board.move_shelf(id, Vec2f::new(-100.0, 9999.0), CONTAINER);
        let shelf = board.shelf(id).unwrap();
        assert_eq!(shelf.pos.x, 0.0);
        assert_eq!(shelf.pos.y, CONTAINER.y - shelf.size.y);
    }

    #[test]
    fn test_apply_recommendations_counts_matches() {
        let mut board = ShelfBoard::new();
        board.add_shelf(CONTAINER);
        board.add_shelf(CONTAINER);

        let mut recs = HashMap::new();
        recs.insert("Raf 1".to_string(), "Süt Ürünleri".to_string());
        assert_eq!(board.apply_recommendations(&recs), 1);
        assert_eq!(
            board.shelf(1).unwrap().display_category.as_deref(),
            Some("Süt Ürünleri")
        );
        assert!(board.shelf(2).unwrap().display_category.is_none());

        let mut unmatched = HashMap::new();
        unmatched.insert("Depo".to_string(), "İçecek".to_string());
        assert_eq!(board.apply_recommendations(&unmatched), 0);
    }

    #[test]
    fn test_apply_recommendations_keeps_canonical_state() {
        let mut board = ShelfBoard::new();
        board.add_shelf(CONTAINER);
        let mut recs = HashMap::new();
        recs.insert("Raf 1".to_string(), "İçecek".to_string());
        board.apply_recommendations(&recs);

        // The serialized layout never contains the display label
        let snapshot = board.snapshot().unwrap();
        assert_eq!(snapshot[0].name, "Raf 1");
        let json = serde_json::to_string(&snapshot[0].to_cabinet()).unwrap();
        assert!(!json.contains("İçecek"));
    }
}
