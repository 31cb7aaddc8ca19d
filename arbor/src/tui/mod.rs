pub mod events;
pub mod program;
pub mod ui;

pub use events::InputReader;
pub use program::Program;
