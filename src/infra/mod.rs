pub mod file_sessions;
pub mod keyword;
pub mod luis;
pub mod memory_sessions;
pub mod tickets;
