/// A discrete action applied to the falling piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateClockwise,
    RotateCounterClockwise,
    HardDrop,
}
