pub mod intent_recognizer;
pub mod session_store;
pub mod ticket_api;

pub use intent_recognizer::IntentRecognizer;
pub use session_store::SessionStore;
pub use ticket_api::TicketApi;
