pub mod handler;
pub mod key;
pub mod translator;

pub use handler::{Control, KeyboardTracker};
pub use key::{Key, KeySnapshot};
pub use translator::InputState;
