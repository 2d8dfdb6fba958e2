// Draft engine: pick order, session state machine, AI drafting policy.

pub mod ai;
pub mod error;
pub mod order;
pub mod session;
pub mod turn;

pub use ai::AiPickPolicy;
pub use error::DraftError;
pub use order::{generate_draft_order, DraftOrderConfig, DraftType, UserDraftPosition};
pub use session::{DraftSession, DraftedPlayer, SessionState};
pub use turn::{advance_turn, run_until_user_turn, TurnOutcome};
