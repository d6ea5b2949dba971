use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeKitError {
    #[error("failed to parse accessory database: {0}")]
    InvalidModel(#[from] serde_json::Error),

    #[error("accessory {aid} is unreachable: {reason}")]
    Unreachable { aid: u64, reason: String },
}
