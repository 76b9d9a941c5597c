use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An RGBA color with 0-255 channels.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Board-relative position: `x` is the column, `y` is the row (0 = top).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ShapeKind {
    I, O, T, S, Z, J, L
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I, ShapeKind::O, ShapeKind::T,
        ShapeKind::S, ShapeKind::Z, ShapeKind::J, ShapeKind::L,
    ];
}

/// A tetromino: a square occupancy grid, a color and where the grid's
/// top-left corner sits on the board.
///
/// The grid is always square so rotation can be done in place with a
/// transpose followed by a reversal.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    cells: Vec<Vec<bool>>,
    color: Rgba,
    origin: Point,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        let (cells, color) = match kind {
            ShapeKind::I => (vec![
                vec![false, false, false, false],
                vec![true, true, true, true],
                vec![false, false, false, false],
                vec![false, false, false, false],
            ], Rgba::new(0, 200, 220, 255)),
            ShapeKind::O => (vec![
                vec![true, true],
                vec![true, true],
            ], Rgba::new(230, 210, 40, 255)),
            ShapeKind::T => (vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, false, false],
            ], Rgba::new(170, 60, 200, 255)),
            ShapeKind::S => (vec![
                vec![false, true, true],
                vec![true, true, false],
                vec![false, false, false],
            ], Rgba::new(50, 200, 70, 255)),
            ShapeKind::Z => (vec![
                vec![true, true, false],
                vec![false, true, true],
                vec![false, false, false],
            ], Rgba::new(210, 50, 50, 255)),
            ShapeKind::J => (vec![
                vec![true, false, false],
                vec![true, true, true],
                vec![false, false, false],
            ], Rgba::new(50, 80, 210, 255)),
            ShapeKind::L => (vec![
                vec![false, false, true],
                vec![true, true, true],
                vec![false, false, false],
            ], Rgba::new(240, 140, 30, 255)),
        };

        Self {
            kind,
            cells,
            color,
            origin: Point::default(),
        }
    }

    /// The same shape placed at `origin`.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Side length of the occupancy grid.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Vec<bool>] {
        &self.cells
    }

    pub(crate) fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.origin.x += dx;
        self.origin.y += dy;
    }

    // Rotate 90 degrees: transpose, then reverse each row.
    pub fn rotate_clockwise(&mut self) {
        self.transpose();
        for row in self.cells.iter_mut() {
            row.reverse();
        }
    }

    // Rotate -90 degrees: transpose, then reverse the order of the rows.
    pub fn rotate_counter_clockwise(&mut self) {
        self.transpose();
        self.cells.reverse();
    }

    fn transpose(&mut self) {
        let size = self.cells.len();
        for i in 0..size {
            for j in (i + 1)..size {
                let tmp = self.cells[i][j];
                self.cells[i][j] = self.cells[j][i];
                self.cells[j][i] = tmp;
            }
        }
    }

    /// Absolute `(col, row)` of every filled cell at the current origin.
    pub fn blocks(&self) -> Vec<(i32, i32)> {
        let mut blocks = Vec::new();
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell {
                    blocks.push((self.origin.x + j as i32, self.origin.y + i as i32));
                }
            }
        }
        blocks
    }
}

/// Produces tetrominoes from an owned, explicitly seeded generator.
#[derive(Debug, Clone)]
pub struct ShapeFactory {
    rng: StdRng,
}

impl ShapeFactory {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Picks uniformly among the seven kinds.
    pub fn random_shape(&mut self) -> Shape {
        let kind = ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())];
        Shape::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_is_in_place() {
        let mut shape = Shape::new(ShapeKind::L);
        shape.transpose();
        assert_eq!(
            shape.cells(),
            &[
                vec![false, true, false],
                vec![false, true, false],
                vec![true, true, false],
            ]
        );
    }

    #[test]
    fn test_translate_moves_origin() {
        let mut shape = Shape::new(ShapeKind::T);
        shape.translate(3, -2);
        assert_eq!(shape.origin(), Point::new(3, -2));
        assert_eq!(shape.blocks()[0], (4, -2));
    }
}
