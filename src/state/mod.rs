// Client-side state holders, one per UI concern

pub mod messages;
pub mod sessions;

pub use messages::{MessageState, PendingSend, SendOutcome, SendPhase};
pub use sessions::SessionState;
