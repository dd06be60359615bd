//! Unified Error Model
use pipewatch_pacp::PacpError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipewatchError {
    #[error(transparent)]
    Pacp(#[from] PacpError),

    #[error("SEGMENT/{0}")]
    UnknownSegment(String),

    #[error("INVENTORY/{0}")]
    InvalidInventory(String),

    #[error("CONFIG/{0}")]
    Config(String),
}
