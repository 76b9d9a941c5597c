use std::collections::HashMap;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEventKind};

use crate::constants::KEY_TIMEOUT;
use crate::input::key::{Key, KeySnapshot};

/// Requests that belong to the launcher rather than the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    Restart,
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

/// Turns terminal key events into one `KeySnapshot` per frame.
///
/// With keyboard enhancement the terminal reports releases, so keys stay held
/// until released. Without it a held key arrives as repeated presses, and a
/// key stays held until `KEY_TIMEOUT` passes with no press or repeat.
#[derive(Debug, Default)]
pub struct KeyboardTracker {
    held: KeySnapshot,
    last_activity: HashMap<Key, Instant>,
    pub keyboard_enhancement_active: bool,
}

impl KeyboardTracker {
    pub fn new(keyboard_enhancement_active: bool) -> Self {
        Self {
            keyboard_enhancement_active,
            ..Self::default()
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, kind: KeyEventKind, now: Instant) -> Option<Control> {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Some(Control::Quit);
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if kind == KeyEventKind::Press {
                            return Some(Control::Restart);
                        }
                    }
                    _ => {
                        if let Some(key) = map_key(code) {
                            self.held.set(key, true);
                            self.last_activity.insert(key, now);
                        }
                    }
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = map_key(code) {
                    self.held.set(key, false);
                    self.last_activity.remove(&key);
                }
            }
        }
        None
    }

    /// Keys held this frame.
    pub fn snapshot(&mut self, now: Instant) -> KeySnapshot {
        if !self.keyboard_enhancement_active {
            self.check_timeouts(now);
        }
        self.held
    }

    fn check_timeouts(&mut self, now: Instant) {
        let held = &mut self.held;
        self.last_activity.retain(|&key, &mut last| {
            let active = now.duration_since(last) <= KEY_TIMEOUT;
            if !active {
                held.set(key, false);
            }
            active
        });
    }

    pub fn release_all(&mut self) {
        self.held = KeySnapshot::default();
        self.last_activity.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::game::Command;
    use crate::input::translator::InputState;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_key_released_after_timeout_without_enhancement() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new(false);
        assert_eq!(tracker.handle_key(KeyCode::Left, KeyEventKind::Press, start), None);
        assert!(tracker.snapshot(start).left);
        assert!(tracker.snapshot(start + FRAME).left);
        assert!(!tracker.snapshot(start + KEY_TIMEOUT + FRAME).left);
    }

    #[test]
    fn test_repeated_presses_drop_once_while_held() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new(false);
        let mut input = InputState::new();
        let mut drops = 0;

        let mut run_frames = |tracker: &mut KeyboardTracker, first: u32, last: u32, pressing: bool| {
            for frame in first..last {
                let now = start + FRAME * frame;
                if pressing && frame % 2 == 0 {
                    tracker.handle_key(KeyCode::Char(' '), KeyEventKind::Press, now);
                }
                input.update(tracker.snapshot(now));
                drops += input.commands().iter().filter(|&&c| c == Command::HardDrop).count();
            }
        };

        // Held for about a second, auto-repeat on every other frame
        run_frames(&mut tracker, 0, 60, true);
        // Released long enough to time out, then pressed again
        run_frames(&mut tracker, 60, 80, false);
        run_frames(&mut tracker, 80, 90, true);

        assert_eq!(drops, 2);
    }

    #[test]
    fn test_enhanced_key_held_until_release() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new(true);
        tracker.handle_key(KeyCode::Char(' '), KeyEventKind::Press, start);
        assert!(tracker.snapshot(start).space);
        // No timeout when releases are reported
        assert!(tracker.snapshot(start + KEY_TIMEOUT * 5).space);
        tracker.handle_key(KeyCode::Char(' '), KeyEventKind::Release, start + KEY_TIMEOUT * 5);
        assert!(!tracker.snapshot(start + KEY_TIMEOUT * 5).space);
    }

    #[test]
    fn test_release_all_clears_held_keys() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new(false);
        tracker.handle_key(KeyCode::Right, KeyEventKind::Press, start);
        tracker.release_all();
        assert_eq!(tracker.snapshot(start), KeySnapshot::default());
    }

    #[test]
    fn test_control_keys() {
        let now = Instant::now();
        let mut tracker = KeyboardTracker::new(false);
        assert_eq!(tracker.handle_key(KeyCode::Char('q'), KeyEventKind::Press, now), Some(Control::Quit));
        assert_eq!(tracker.handle_key(KeyCode::Char('r'), KeyEventKind::Press, now), Some(Control::Restart));
        assert_eq!(tracker.handle_key(KeyCode::Char('r'), KeyEventKind::Release, now), None);
    }
}
