use crate::game::command::Command;
use crate::input::key::{Key, KeySnapshot};

// Emission order: drop first, then rotations, then moves.
const BINDINGS: [(Key, Command); 5] = [
    (Key::Space, Command::HardDrop),
    (Key::Up, Command::RotateCounterClockwise),
    (Key::Down, Command::RotateClockwise),
    (Key::Left, Command::MoveLeft),
    (Key::Right, Command::MoveRight),
];

/// Current and previous key snapshots. A command fires only on the frame
/// its key goes from released to pressed.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: KeySnapshot,
    previous: KeySnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, snapshot: KeySnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    pub fn current(&self) -> KeySnapshot {
        self.current
    }

    pub fn previous(&self) -> KeySnapshot {
        self.previous
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.current.is_pressed(key) && !self.previous.is_pressed(key)
    }

    pub fn commands(&self) -> Vec<Command> {
        BINDINGS
            .iter()
            .filter(|(key, _)| self.just_pressed(*key))
            .map(|&(_, command)| command)
            .collect()
    }
}
