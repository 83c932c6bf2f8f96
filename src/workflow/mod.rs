pub mod answer_verifier;
pub mod presenter;

pub use answer_verifier::{
    AnswerVerifier, Deferred, DeferredAction, VerifierDelays, VerifierState, VerifierStats,
};
pub use presenter::{PresenterEvent, QuizPresenter, RecordingPresenter};
