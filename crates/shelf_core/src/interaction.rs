//! Drag and resize state machine for the shelf canvas.
//!
//! One controller instance exists per board, so at most one shelf is ever
//! being dragged or resized. Every entry point that leaves Idle records the
//! grab point and the shelf's starting geometry; `pointer_moved` applies the
//! accumulated delta through the board's clamped mutators. `abort` is a
//! first-class transition: pointer-cancel or window focus loss must always
//! return the machine to Idle so a lost pointer-up cannot strand a shelf in
//! a dragging state.

use crate::board::ShelfBoard;
use crate::geometry::Vec2f;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: u32,
        grab: Vec2f,
        start_pos: Vec2f,
    },
    Resizing {
        id: u32,
        grab: Vec2f,
        start_size: Vec2f,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Shelf currently being dragged or resized, if any
    pub fn active_shelf(&self) -> Option<u32> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { id, .. } | DragState::Resizing { id, .. } => Some(id),
        }
    }

    /// Idle → Dragging. Ignored while another gesture is active.
    pub fn press_body(&mut self, board: &ShelfBoard, id: u32, pointer: Vec2f) {
        if self.state != DragState::Idle {
            return;
        }
        if let Some(shelf) = board.shelf(id) {
            self.state = DragState::Dragging {
                id,
                grab: pointer,
                start_pos: shelf.pos,
            };
        }
    }

    /// Idle → Resizing. Ignored while another gesture is active.
    pub fn press_handle(&mut self, board: &ShelfBoard, id: u32, pointer: Vec2f) {
        if self.state != DragState::Idle {
            return;
        }
        if let Some(shelf) = board.shelf(id) {
            self.state = DragState::Resizing {
                id,
                grab: pointer,
                start_size: shelf.size,
            };
        }
    }

    /// Applies the current pointer position to the active gesture.
    /// Returns true when the board was mutated.
    pub fn pointer_moved(
        &mut self,
        board: &mut ShelfBoard,
        pointer: Vec2f,
        container: Vec2f,
    ) -> bool {
        match self.state {
            DragState::Idle => false,
            DragState::Dragging { id, grab, start_pos } => {
                board.move_shelf(id, start_pos + (pointer - grab), container);
                true
            }
            DragState::Resizing { id, grab, start_size } => {
                board.resize_shelf(id, start_size + (pointer - grab), container);
                true
            }
        }
    }

    /// Pointer-up anywhere ends the active gesture.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pointer-cancel, window blur or visibility change: drop the gesture.
    /// The shelf keeps its last clamped geometry.
    pub fn abort(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MIN_SHELF_H, MIN_SHELF_W};

    const CONTAINER: Vec2f = Vec2f::new(500.0, 400.0);

    fn board_with_one_shelf() -> (ShelfBoard, u32) {
        let mut board = ShelfBoard::new();
        let id = board.add_shelf(CONTAINER).id;
        (board, id)
    }

    #[test]
    fn test_drag_applies_clamped_delta() {
        let (mut board, id) = board_with_one_shelf();
        board.move_shelf(id, Vec2f::new(0.0, 0.0), CONTAINER);

        let mut drag = DragController::new();
        drag.press_body(&board, id, Vec2f::new(60.0, 60.0));
        assert_eq!(drag.active_shelf(), Some(id));

        // Dragging (-50,-50) from the corner stays at the corner
        assert!(drag.pointer_moved(&mut board, Vec2f::new(10.0, 10.0), CONTAINER));
        assert_eq!(board.shelf(id).unwrap().pos, Vec2f::new(0.0, 0.0));

        // A later move is still relative to the grab point, not the clamp
        drag.pointer_moved(&mut board, Vec2f::new(90.0, 80.0), CONTAINER);
        assert_eq!(board.shelf(id).unwrap().pos, Vec2f::new(30.0, 20.0));

        drag.release();
        assert!(drag.is_idle());
    }

    #[test]
    fn test_resize_clamps_to_floor() {
        let (mut board, id) = board_with_one_shelf();
        let mut drag = DragController::new();
        drag.press_handle(&board, id, Vec2f::new(200.0, 200.0));

        drag.pointer_moved(&mut board, Vec2f::new(-9799.0, -9799.0), CONTAINER);
        let shelf = board.shelf(id).unwrap();
        assert_eq!(shelf.size, Vec2f::new(MIN_SHELF_W, MIN_SHELF_H));
    }

    #[test]
    fn test_second_press_is_ignored_while_active() {
        let mut board = ShelfBoard::new();
        let a = board.add_shelf(CONTAINER).id;
        let b = board.add_shelf(CONTAINER).id;

        let mut drag = DragController::new();
        drag.press_body(&board, a, Vec2f::new(0.0, 0.0));
        drag.press_body(&board, b, Vec2f::new(0.0, 0.0));
        assert_eq!(drag.active_shelf(), Some(a));
    }

    #[test]
    fn test_abort_always_returns_to_idle() {
        let (mut board, id) = board_with_one_shelf();
        let start = board.shelf(id).unwrap().pos;

        let mut drag = DragController::new();
        drag.press_body(&board, id, Vec2f::new(0.0, 0.0));
        drag.pointer_moved(&mut board, Vec2f::new(25.0, 0.0), CONTAINER);
        drag.abort();

        assert!(drag.is_idle());
        // Geometry stays wherever the last clamped move left it
        assert_eq!(board.shelf(id).unwrap().pos.x, start.x + 25.0);

        // No further motion is applied after the abort
        assert!(!drag.pointer_moved(&mut board, Vec2f::new(250.0, 0.0), CONTAINER));
        assert_eq!(board.shelf(id).unwrap().pos.x, start.x + 25.0);
    }

    #[test]
    fn test_press_unknown_shelf_stays_idle() {
        let (board, _) = board_with_one_shelf();
        let mut drag = DragController::new();
        drag.press_body(&board, 999, Vec2f::new(0.0, 0.0));
        assert!(drag.is_idle());
    }
}
