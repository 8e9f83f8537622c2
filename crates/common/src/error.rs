use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    Token(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
