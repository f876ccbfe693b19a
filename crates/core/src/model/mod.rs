mod ids;
mod item;
mod results;
mod round;
mod team;

pub use ids::{ItemId, TeamId};
pub use item::{Item, ItemGroup, Roster, RosterError};
pub use results::{QuizResults, SoloBand, Standing};
pub use round::{Feedback, Round, RoundToken};
pub use team::{Team, TeamCount, TeamCountError, TeamPreset};
