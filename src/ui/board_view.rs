//! Board rendering for the Hex GUI
//!
//! Cells are pointy-top hexagons laid out as a rhombus: each row is shifted
//! half a cell to the right of the one above it, so the six grid neighbours
//! of a cell are also its six touching hexagons on screen.

use crate::{Board, Cell, Pos, Side};
use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use super::theme::*;

const SQRT_3: f32 = 1.732_050_8;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Center-to-corner radius of one hexagon
    radius: f32,
    /// Screen position of cell (0, 0)
    origin: Pos2,
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            radius: 20.0,
            origin: Pos2::ZERO,
            size: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        to_move: Side,
        last_move: Option<Pos>,
        route: &[Pos],
        accepts_input: bool,
    ) -> Option<Pos> {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click());
        self.layout(response.rect, board.size());

        painter.rect_filled(response.rect, CornerRadius::same(4), BOARD_BG);
        self.draw_edges(&painter);

        for pos in board.positions() {
            self.draw_cell(&painter, pos);
            if let Cell::Stone(side) = board.get(pos) {
                self.draw_stone(&painter, pos, side);
            }
        }
        self.draw_coordinates(&painter);

        for &pos in route {
            if board.is_cell_empty(pos) {
                painter.circle_filled(self.board_to_screen(pos), self.radius * 0.18, ROUTE_MARKER);
            }
        }

        if let Some(pos) = last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        let mut clicked = None;
        if accepts_input {
            if let Some(pos) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let is_valid = board.is_cell_empty(pos);
                let color = if is_valid {
                    stone_preview(to_move)
                } else {
                    hover_invalid()
                };
                painter.circle_filled(
                    self.board_to_screen(pos),
                    self.radius * STONE_RADIUS_RATIO,
                    color,
                );
                if response.clicked() && is_valid {
                    clicked = Some(pos);
                }
            }
        }
        clicked
    }

    /// Fit the rhombus into `rect`.
    fn layout(&mut self, rect: Rect, size: usize) {
        let n = size.max(1) as f32;
        // Rhombus extent in units of the hexagon radius
        let width_units = SQRT_3 * (1.5 * (n - 1.0) + 1.0);
        let height_units = 1.5 * (n - 1.0) + 2.0;

        let usable = rect.size() - Vec2::splat(2.0 * BOARD_MARGIN);
        self.radius = (usable.x / width_units).min(usable.y / height_units).max(4.0);
        self.size = size;

        let extent = Vec2::new(width_units, height_units) * self.radius;
        let top_left = rect.center() - extent / 2.0;
        self.origin = top_left + Vec2::new(SQRT_3 * self.radius / 2.0, self.radius);
    }

    fn hexagon(&self, center: Pos2, radius: f32) -> Vec<Pos2> {
        (0..6)
            .map(|i| {
                let angle = std::f32::consts::PI / 180.0 * (60.0 * i as f32 - 30.0);
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    }

    fn draw_cell(&self, painter: &Painter, pos: Pos) {
        let points = self.hexagon(self.board_to_screen(pos), self.radius);
        painter.add(Shape::convex_polygon(
            points,
            CELL_FILL,
            Stroke::new(CELL_OUTLINE_WIDTH, CELL_OUTLINE),
        ));
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, side: Side) {
        let center = self.board_to_screen(pos);
        let radius = self.radius * STONE_RADIUS_RATIO;
        painter.circle_filled(center, radius, stone_color(side));
        painter.circle_filled(
            center + Vec2::new(-radius * 0.3, -radius * 0.3),
            radius * 0.2,
            stone_highlight(side),
        );
    }

    /// Colour bars along the edges each side must join.
    fn draw_edges(&self, painter: &Painter) {
        if self.size == 0 {
            return;
        }
        let last = (self.size - 1) as u8;
        let w = SQRT_3 * self.radius;
        let red = Stroke::new(EDGE_BAR_WIDTH, RED_STONE);
        let blue = Stroke::new(EDGE_BAR_WIDTH, BLUE_STONE);

        let side_gap = Vec2::new(w * 0.75, 0.0);
        let left = [Pos::new(0, 0), Pos::new(last, 0)].map(|p| self.board_to_screen(p) - side_gap);
        let right = [Pos::new(0, last), Pos::new(last, last)].map(|p| self.board_to_screen(p) + side_gap);
        painter.line_segment(left, red);
        painter.line_segment(right, red);

        let row_gap = Vec2::new(0.0, self.radius * 1.3);
        let top = [Pos::new(0, 0), Pos::new(0, last)].map(|p| self.board_to_screen(p) - row_gap);
        let bottom = [Pos::new(last, 0), Pos::new(last, last)].map(|p| self.board_to_screen(p) + row_gap);
        painter.line_segment(top, blue);
        painter.line_segment(bottom, blue);
    }

    /// Column letters above the top row, row numbers left of column 0
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        for i in 0..self.size {
            let letter = (b'A' + i as u8) as char;
            let above = self.board_to_screen(Pos::new(0, i as u8)) - Vec2::new(0.0, self.radius * 2.0);
            painter.text(above, egui::Align2::CENTER_CENTER, letter, font.clone(), LABEL);

            let left = self.board_to_screen(Pos::new(i as u8, 0)) - Vec2::new(SQRT_3 * self.radius * 1.3, 0.0);
            painter.text(left, egui::Align2::CENTER_CENTER, i + 1, font.clone(), LABEL);
        }
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let w = SQRT_3 * self.radius;
        let rel = screen_pos - self.origin;
        let row_f = rel.y / (1.5 * self.radius);
        let col_f = (rel.x - row_f * w / 2.0) / w;

        // Cube rounding on axial (col, row)
        let (x, z) = (col_f, row_f);
        let y = -x - z;
        let (mut rx, ry, mut rz) = (x.round(), y.round(), z.round());
        let (dx, dy, dz) = ((rx - x).abs(), (ry - y).abs(), (rz - z).abs());
        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy <= dz {
            rz = -rx - ry;
        }

        let (row, col) = (rz as i32, rx as i32);
        let n = self.size as i32;
        if !(0..n).contains(&row) || !(0..n).contains(&col) {
            return None;
        }
        Some(Pos::new(row as u8, col as u8))
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let w = SQRT_3 * self.radius;
        let x = self.origin.x + pos.col as f32 * w + pos.row as f32 * w / 2.0;
        let y = self.origin.y + pos.row as f32 * 1.5 * self.radius;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(size: usize) -> BoardView {
        let mut view = BoardView::default();
        view.layout(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)), size);
        view
    }

    #[test]
    fn test_centers_map_back_to_cells() {
        let view = view(11);
        for row in 0..11u8 {
            for col in 0..11u8 {
                let pos = Pos::new(row, col);
                assert_eq!(view.screen_to_board(view.board_to_screen(pos)), Some(pos));
            }
        }
    }

    #[test]
    fn test_outside_board() {
        let view = view(7);
        let corner = view.board_to_screen(Pos::new(0, 0));
        assert_eq!(view.screen_to_board(corner - Vec2::new(200.0, 0.0)), None);
        assert_eq!(view.screen_to_board(corner - Vec2::new(0.0, 200.0)), None);
    }

    #[test]
    fn test_neighbours_touch() {
        let view = view(7);
        let center = view.board_to_screen(Pos::new(3, 3));
        let spacing = SQRT_3 * view.radius;
        for (dr, dc) in crate::board::HEX_DIRECTIONS {
            let pos = Pos::new((3 + dr) as u8, (3 + dc) as u8);
            let distance = (view.board_to_screen(pos) - center).length();
            assert!((distance - spacing).abs() < 0.01);
        }
    }
}
