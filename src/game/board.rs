//! The settled grid plus the falling piece.
//!
//! Coordinates use the top-left corner as `(0, 0)`: rows grow downward and
//! gravity increments the row. Pieces spawn at row 0, horizontally centered.

use std::fmt;

use tracing::{debug, error, info, trace, warn};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::command::Command;
use crate::game::piece::{Point, Rgba, Shape, ShapeFactory};

/// A landed block, or nothing.
pub type Cell = Option<Rgba>;

pub type Grid = [[Cell; BOARD_WIDTH]; BOARD_HEIGHT];

const EMPTY_ROW: [Cell; BOARD_WIDTH] = [None; BOARD_WIDTH];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cell (row {row}, col {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell (row {row}, col {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// What a single gravity step did to the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The piece moved one row down.
    Fell,
    /// The piece could not move and became part of the grid.
    Landed,
    /// The board is full; nothing happens until a reset.
    GameOver,
}

/// Drawing target for the board. Receives one call per filled cell.
pub trait Canvas {
    fn fill_cell(&mut self, row: usize, col: usize, color: Rgba);
}

pub struct Board {
    grid: Grid,
    falling: Option<Shape>,
    factory: ShapeFactory,
    game_over: bool,
}

impl Board {
    pub fn new(factory: ShapeFactory) -> Self {
        Self {
            grid: [EMPTY_ROW; BOARD_HEIGHT],
            falling: None,
            factory,
            game_over: false,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ShapeFactory::from_seed(seed))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn cells(&self) -> &Grid {
        &self.grid
    }

    /// Returns `None` both for empty and out-of-bounds positions.
    pub fn cell(&self, row: i32, col: i32) -> Cell {
        index(row, col).and_then(|(row, col)| self.grid[row][col])
    }

    pub fn falling_piece(&self) -> Option<&Shape> {
        self.falling.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn set_cell(&mut self, row: i32, col: i32, cell: Cell) -> Result<(), PlacementError> {
        let (r, c) = index(row, col).ok_or(PlacementError::OutOfBounds { row, col })?;
        self.grid[r][c] = cell;
        Ok(())
    }

    /// Installs a piece exactly where its origin says, replacing any falling piece.
    pub fn set_falling_piece(&mut self, shape: Option<Shape>) {
        self.falling = shape;
    }

    /// `false` for rows outside the board.
    pub fn is_row_full(&self, row: usize) -> bool {
        self.grid
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Removes every full row, shifting the rows above down. Returns the
    /// indices the cleared rows had before the shift, bottom first.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
                continue;
            }
            write_row -= 1;
            if read_row != write_row {
                self.grid[write_row] = self.grid[read_row];
            }
        }

        for row in self.grid.iter_mut().take(write_row) {
            *row = EMPTY_ROW;
        }

        if !cleared.is_empty() {
            info!(rows = ?cleared, "cleared full rows");
        }
        cleared
    }

    /// Places `shape` at the spawn position and makes it the falling piece.
    /// Returns `false` if the spawn is blocked, which ends the game.
    pub fn spawn(&mut self, shape: Shape) -> bool {
        match self.position_for_spawn(shape) {
            Some(piece) => {
                self.falling = Some(piece);
                true
            }
            None => false,
        }
    }

    fn position_for_spawn(&mut self, mut shape: Shape) -> Option<Shape> {
        if self.game_over {
            return None;
        }
        let x = (BOARD_WIDTH / 2) as i32 - (shape.size() / 2) as i32;
        shape.set_origin(Point::new(x, 0));

        if self.intersects(Some(&shape)) {
            warn!(kind = ?shape.kind(), "spawn position is blocked, game over");
            self.game_over = true;
            self.falling = None;
            return None;
        }
        debug!(kind = ?shape.kind(), origin = ?shape.origin(), "spawned piece");
        Some(shape)
    }

    /// One gravity tick: clear full rows, spawn if nothing is falling, then
    /// move the piece down or land it.
    pub fn step(&mut self) -> StepOutcome {
        if self.game_over {
            return StepOutcome::GameOver;
        }

        self.clear_full_rows();

        let mut piece = match self.falling.take() {
            Some(piece) => piece,
            None => {
                let shape = self.factory.random_shape();
                match self.position_for_spawn(shape) {
                    Some(piece) => piece,
                    None => return StepOutcome::GameOver,
                }
            }
        };

        piece.translate(0, 1);
        if self.intersects(Some(&piece)) {
            piece.translate(0, -1);
            self.land(piece);
            if self.game_over {
                return StepOutcome::GameOver;
            }
            return StepOutcome::Landed;
        }

        self.falling = Some(piece);
        StepOutcome::Fell
    }

    /// Whether `shape` at its current origin overlaps a landed block or
    /// leaves the board. Rows above the top are tolerated; columns are
    /// checked for every row.
    pub fn intersects(&self, shape: Option<&Shape>) -> bool {
        let Some(shape) = shape else {
            return false;
        };

        for (col, row) in shape.blocks() {
            if row >= BOARD_HEIGHT as i32 {
                return true;
            }
            if col < 0 || col >= BOARD_WIDTH as i32 {
                return true;
            }
            if row < 0 {
                continue;
            }
            if self.grid[row as usize][col as usize].is_some() {
                return true;
            }
        }
        false
    }

    fn land(&mut self, piece: Shape) {
        debug!(kind = ?piece.kind(), origin = ?piece.origin(), "piece landed");
        self.add_to_board(&piece);

        if piece.blocks().iter().any(|&(_, row)| row < 0) {
            warn!(kind = ?piece.kind(), "piece landed above the board, game over");
            self.game_over = true;
        }
    }

    /// Copies the filled cells of `shape` into the grid. Cells that are
    /// already occupied are reported and skipped. Returns how many cells
    /// were written.
    pub fn add_to_board(&mut self, shape: &Shape) -> usize {
        let color = shape.color();
        let mut written = 0;

        for (col, row) in shape.blocks() {
            if row < 0 {
                continue;
            }
            match self.place_block(row, col, color) {
                Ok(()) => written += 1,
                Err(err) => error!(%err, kind = ?shape.kind(), "error adding shape to board"),
            }
        }
        written
    }

    fn place_block(&mut self, row: i32, col: i32, color: Rgba) -> Result<(), PlacementError> {
        let (r, c) = index(row, col).ok_or(PlacementError::OutOfBounds { row, col })?;
        if self.grid[r][c].is_some() {
            return Err(PlacementError::Occupied { row: r, col: c });
        }
        self.grid[r][c] = Some(color);
        Ok(())
    }

    /// Applies a command to the falling piece. Returns whether it took effect.
    pub fn apply(&mut self, command: Command) -> bool {
        trace!(?command, "applying command");
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateClockwise => self.rotate_cw(),
            Command::RotateCounterClockwise => self.rotate_ccw(),
            Command::HardDrop => self.hard_drop() > 0,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_transform(|piece| piece.translate(-1, 0), |piece| piece.translate(1, 0))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_transform(|piece| piece.translate(1, 0), |piece| piece.translate(-1, 0))
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_transform(Shape::rotate_clockwise, Shape::rotate_counter_clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_transform(Shape::rotate_counter_clockwise, Shape::rotate_clockwise)
    }

    // Applies `forward`, and `inverse` if the result would intersect.
    fn try_transform(&mut self, forward: impl Fn(&mut Shape), inverse: impl Fn(&mut Shape)) -> bool {
        if self.game_over {
            return false;
        }
        let Some(mut piece) = self.falling.take() else {
            return false;
        };

        forward(&mut piece);
        let valid = !self.intersects(Some(&piece));
        if !valid {
            inverse(&mut piece);
        }
        self.falling = Some(piece);
        valid
    }

    /// Repeats the gravity step until a piece lands. Spawns one first if
    /// nothing is falling. Returns the number of steps taken.
    pub fn hard_drop(&mut self) -> usize {
        let mut steps = 0;
        // A spawned piece lands after at most BOARD_HEIGHT steps.
        while steps <= BOARD_HEIGHT {
            let outcome = self.step();
            if outcome == StepOutcome::GameOver && steps == 0 {
                return 0;
            }
            steps += 1;
            if outcome != StepOutcome::Fell {
                break;
            }
        }
        steps
    }

    pub fn reset(&mut self) {
        self.grid = [EMPTY_ROW; BOARD_HEIGHT];
        self.falling = None;
        self.game_over = false;
        info!("board reset");
    }

    /// Emits every settled cell, then the in-board cells of the falling piece.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(color) = cell {
                    canvas.fill_cell(row, col, *color);
                }
            }
        }

        if let Some(piece) = &self.falling {
            let color = piece.color();
            for (col, row) in piece.blocks() {
                if let Some((row, col)) = index(row, col) {
                    canvas.fill_cell(row, col, color);
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let falling = self.falling.as_ref().map(Shape::blocks).unwrap_or_default();
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let symbol = if falling.contains(&(col as i32, row as i32)) {
                    '@'
                } else if self.grid[row][col].is_some() {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn index(row: i32, col: i32) -> Option<(usize, usize)> {
    if row < 0 || col < 0 || row >= BOARD_HEIGHT as i32 || col >= BOARD_WIDTH as i32 {
        return None;
    }
    Some((row as usize, col as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bounds() {
        assert_eq!(index(0, 0), Some((0, 0)));
        assert_eq!(index(-1, 0), None);
        assert_eq!(index(0, BOARD_WIDTH as i32), None);
        assert_eq!(index(BOARD_HEIGHT as i32, 0), None);
    }

    #[test]
    fn test_place_block_rejects_occupied() {
        let mut board = Board::with_seed(1);
        let color = Rgba::new(1, 2, 3, 255);
        assert!(board.place_block(5, 5, color).is_ok());
        assert_eq!(
            board.place_block(5, 5, color),
            Err(PlacementError::Occupied { row: 5, col: 5 })
        );
        assert_eq!(
            board.place_block(-1, 5, color),
            Err(PlacementError::OutOfBounds { row: -1, col: 5 })
        );
    }
}
