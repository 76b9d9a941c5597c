use std::time::{Duration, Instant};

use tracing::info;

use crate::constants::GRAVITY_TICK;
use crate::game::board::{Board, StepOutcome};
use crate::game::piece::ShapeFactory;
use crate::input::key::KeySnapshot;
use crate::input::translator::InputState;

/// One running game: the board, the input debounce and the gravity timer.
pub struct Game {
    pub board: Board,
    pub input_state: InputState,
    gravity_tick: Duration,
    gravity_timer: Instant,
}

impl Game {
    pub fn new(factory: ShapeFactory, gravity_tick: Duration, now: Instant) -> Self {
        Self {
            board: Board::new(factory),
            input_state: InputState::new(),
            gravity_tick,
            gravity_timer: now,
        }
    }

    pub fn with_seed(seed: u64, now: Instant) -> Self {
        Self::new(ShapeFactory::from_seed(seed), GRAVITY_TICK, now)
    }

    pub fn gravity_tick(&self) -> Duration {
        self.gravity_tick
    }

    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Runs one frame: applies the commands from the latest key snapshot,
    /// then at most one gravity step if the tick has elapsed.
    pub fn update(&mut self, snapshot: KeySnapshot, now: Instant) -> Option<StepOutcome> {
        self.input_state.update(snapshot);
        for command in self.input_state.commands() {
            self.board.apply(command);
        }

        if now.duration_since(self.gravity_timer) >= self.gravity_tick {
            self.gravity_timer = now;
            return Some(self.board.step());
        }
        None
    }

    pub fn reset(&mut self, now: Instant) {
        self.board.reset();
        self.input_state = InputState::new();
        self.gravity_timer = now;
        info!("game restarted");
    }
}
