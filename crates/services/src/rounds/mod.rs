mod effects;
mod engine;
mod plan;
mod timers;
mod view;
mod workflow;

// Public API of the round subsystem.
pub use crate::error::QuizError;
pub use effects::{AnswerOutcome, AnswerResult, Effect, Tick};
pub use engine::{QuizEngine, RoundRecord, Session, SessionPhase};
pub use plan::{RoundBuilder, RoundPlan};
pub use view::QuizSnapshot;
pub use workflow::QuizLoopService;
