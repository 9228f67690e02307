use drive_api::DriveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("A sync is already in progress")]
    AlreadyRunning,

    #[error("Sync submission failed: {0}")]
    Submit(#[from] DriveError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
