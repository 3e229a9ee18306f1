//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Console)
//! but are themselves concrete structs, not traits.

mod game;
mod store;

pub use game::{
    GameService, Outcome, RoundReport, SessionReport, SessionSummary, DEFAULT_MAX_INPUT_LEN,
};
pub use store::TreeStore;
