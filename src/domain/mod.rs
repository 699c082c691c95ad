pub mod activity;
pub mod intent;
pub mod ticket;
