pub mod renderer;

pub use renderer::{ui, TerminalCanvas};
