#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod phrases;
pub mod settings;
pub mod time;

pub use phrases::Phrasebook;
pub use settings::{OPTIONS_PER_ROUND, QuizSettings, QuizSettingsError};
pub use time::Clock;
