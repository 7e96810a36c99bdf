// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod game;
pub mod language;
pub mod leaderboard;
pub mod logging;
pub mod mode;
pub mod runtime;
pub mod scheduler;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod store;
pub mod ui;

pub use error::StoreError;
pub use game::{Game, GameEvent, GameState};
pub use mode::Mode;
