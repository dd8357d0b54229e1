// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod message;
pub mod page;
pub mod reference;
pub mod session;
pub mod suggestion;
pub mod user;

pub use message::{AI_USER_ID, Message, MessageType, next_message_id, next_temp_id};
pub use page::Page;
pub use reference::{Reference, ReferenceType};
pub use session::{ChatSession, SessionPatch, SessionStatus};
pub use suggestion::{CompanyNameSuggestion, Feedback, SuggestionStatus};
pub use user::{UserInfo, UserPatch};
