//! Error types for hosts-dom

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read hosts data: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write hosts data: {0}")]
    Write(#[source] std::io::Error),

    #[error("Not an IP address: {value}")]
    InvalidIp { value: String },
}
