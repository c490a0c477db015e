use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind}: {value:?}")]
    InvalidId { kind: &'static str, value: String },
}
