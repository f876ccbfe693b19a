#![forbid(unsafe_code)]

pub mod audio;
pub mod error;
pub mod rounds;

pub use quiz_core::Clock;

pub use audio::{
    AudioPrompter, FallbackAudio, RecordingAudio, SilentAudio, TracingAudio, UnavailableAudio,
};
pub use error::{AudioError, QuizError};
pub use rounds::{
    AnswerOutcome, AnswerResult, Effect, QuizEngine, QuizLoopService, QuizSnapshot,
    RoundBuilder, RoundPlan, RoundRecord, Session, SessionPhase, Tick,
};
