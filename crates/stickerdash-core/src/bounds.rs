//! Selection bounding-box derivation.

use crate::board::StickerBoard;
use crate::selection::SelectionModel;
use kurbo::Rect;

/// Padding added on every side of the selection bounding box.
pub const SELECTION_PADDING: f64 = 10.0;

/// Compute the padded rectangle enclosing the selected stickers.
///
/// Only placed, visible stickers contribute; a hidden sticker is skipped
/// even while selected. Returns None when nothing qualifies, which tells
/// dependent UI (toolbar, handles) not to render.
///
/// Pure derivation over the current board and selection; safe to call at
/// any time.
pub fn selection_bounds(board: &StickerBoard, selection: &SelectionModel) -> Option<Rect> {
    let mut result: Option<Rect> = None;
    for sticker in board.stickers_ordered() {
        if !sticker.placed || sticker.hidden || !selection.is_selected(&sticker.id) {
            continue;
        }
        let footprint = sticker.footprint();
        result = Some(match result {
            Some(rect) => rect.union(footprint),
            None => footprint,
        });
    }
    result.map(|rect| rect.inflate(SELECTION_PADDING, SELECTION_PADDING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticker::Sticker;
    use kurbo::Point;

    fn assert_box(rect: Rect, x: f64, y: f64, width: f64, height: f64) {
        assert!((rect.x0 - x).abs() < f64::EPSILON, "x0 was {}", rect.x0);
        assert!((rect.y0 - y).abs() < f64::EPSILON, "y0 was {}", rect.y0);
        assert!((rect.width() - width).abs() < f64::EPSILON, "width was {}", rect.width());
        assert!((rect.height() - height).abs() < f64::EPSILON, "height was {}", rect.height());
    }

    #[test]
    fn test_single_sticker_box() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(100.0, 100.0)));
        let mut selection = SelectionModel::new();
        selection.toggle("a", false);

        let rect = selection_bounds(&board, &selection).unwrap();
        assert_box(rect, 90.0, 90.0, 80.0, 80.0);
    }

    #[test]
    fn test_two_sticker_box() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(0.0, 0.0)));
        board.place_sticker(Sticker::new("b", Point::new(200.0, 0.0)));
        let mut selection = SelectionModel::new();
        selection.toggle("a", true);
        selection.toggle("b", true);

        let rect = selection_bounds(&board, &selection).unwrap();
        assert_box(rect, -10.0, -10.0, 280.0, 80.0);
    }

    #[test]
    fn test_empty_selection_is_inactive() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(0.0, 0.0)));

        assert!(selection_bounds(&board, &SelectionModel::new()).is_none());
    }

    #[test]
    fn test_hidden_selected_sticker_is_inactive() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(100.0, 100.0)));
        board.set_hidden("a", true);
        let mut selection = SelectionModel::new();
        selection.toggle("a", false);

        assert!(selection_bounds(&board, &selection).is_none());
    }

    #[test]
    fn test_hidden_sticker_excluded_from_union() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(0.0, 0.0)));
        board.place_sticker(Sticker::new("b", Point::new(200.0, 0.0)));
        board.set_hidden("b", true);
        let mut selection = SelectionModel::new();
        selection.toggle("a", true);
        selection.toggle("b", true);

        let rect = selection_bounds(&board, &selection).unwrap();
        assert_box(rect, -10.0, -10.0, 80.0, 80.0);
    }

    #[test]
    fn test_unplaced_sticker_excluded() {
        let mut board = StickerBoard::new();
        let mut sticker = Sticker::new("a", Point::new(0.0, 0.0));
        sticker.placed = false;
        board.place_sticker(sticker);
        let mut selection = SelectionModel::new();
        selection.toggle("a", false);

        assert!(selection_bounds(&board, &selection).is_none());
    }

    #[test]
    fn test_overlapping_stickers_use_union() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(0.0, 0.0)));
        board.place_sticker(Sticker::new("b", Point::new(30.0, 30.0)));
        let mut selection = SelectionModel::new();
        selection.toggle("a", true);
        selection.toggle("b", true);

        let rect = selection_bounds(&board, &selection).unwrap();
        assert_box(rect, -10.0, -10.0, 110.0, 110.0);
    }

    #[test]
    fn test_explicit_size_box() {
        let mut board = StickerBoard::new();
        board.place_sticker(Sticker::new("a", Point::new(50.0, 50.0)).with_size(100.0));
        let mut selection = SelectionModel::new();
        selection.toggle("a", false);

        let rect = selection_bounds(&board, &selection).unwrap();
        assert_box(rect, 40.0, 40.0, 120.0, 120.0);
    }
}
