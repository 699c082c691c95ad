use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("ticket api error: {0}")]
    TicketApi(String),
    #[error("intent recognizer error: {0}")]
    Recognizer(String),
    #[error("card template error: {0}")]
    Template(String),
    #[error("session store error: {0}")]
    Session(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
