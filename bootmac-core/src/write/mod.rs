//! Device write orchestration: unmount -> raw write -> eject.

mod runner;
mod session;

pub use runner::{
    run_with_hal, write, WriteFailure, WriteOrchestrator, WriteOutcome, WritePrompter,
    WriteRequest, WriteState, MAX_IDENTIFIER_ATTEMPTS,
};
pub use session::{is_confirmed, WriteSession, CONFIRMATION_LITERAL};
