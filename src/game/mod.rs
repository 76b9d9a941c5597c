pub mod board;
pub mod command;
pub mod piece;
pub mod state;

pub use board::{Board, Canvas, Cell, PlacementError, StepOutcome};
pub use command::Command;
pub use piece::{Point, Rgba, Shape, ShapeFactory, ShapeKind};
pub use state::Game;
