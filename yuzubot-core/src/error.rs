use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Chatwork API error: {0}")]
    Api(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("No data: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
