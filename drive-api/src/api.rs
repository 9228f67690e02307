//! The `DriveApi` seam
//!
//! Upper layers (sync monitor, file picker) depend on this trait rather
//! than on `DriveClient`, so they can be tested against mocks and hosts can
//! substitute recorded or in-memory backends.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AuthUrl, Conflict, DriveFile, DriveStats, FolderTreeResponse, SyncOptions, SyncStatusReport,
    SyncSubmission,
};

/// Async operations over the Drive integration backend
///
/// Every method carries a `Result` so implementations are free to fail;
/// [`DriveClient`](crate::client::DriveClient) is the implementation that
/// guarantees the read-side fallback policy. Consumers must still handle
/// `Err` from read operations defensively.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Fetch the authorization URL the user should visit
    async fn auth_url(&self) -> Result<AuthUrl>;

    /// Relay the OAuth callback code and state to the backend
    async fn exchange_code(&self, code: &str, state: &str) -> Result<()>;

    /// Check whether a Drive authorization is on file
    async fn check_auth(&self) -> Result<bool>;

    /// Revoke the stored Drive authorization
    async fn revoke_auth(&self) -> Result<()>;

    /// Submit a sync task
    async fn start_sync(&self, options: SyncOptions) -> Result<SyncSubmission>;

    /// Poll the status of a previously submitted sync task
    async fn sync_status(&self, task_id: &str) -> Result<SyncStatusReport>;

    /// Fetch aggregate sync counters for the current user
    async fn user_stats(&self) -> Result<DriveStats>;

    /// List server-detected sync conflicts
    async fn conflicts(&self) -> Result<Vec<Conflict>>;

    /// Ask the backend to run syncs on a recurring interval
    async fn schedule_sync(&self, interval_minutes: u32) -> Result<()>;

    /// List the files of a folder (`None` lists the root)
    async fn list_files(&self, folder_id: Option<String>) -> Result<Vec<DriveFile>>;

    /// Search files by name across the whole Drive
    async fn search_files(&self, query: &str) -> Result<Vec<DriveFile>>;

    /// Fetch one level of the folder hierarchy (`None` fetches the root)
    async fn folder_tree(&self, folder_id: Option<String>) -> Result<FolderTreeResponse>;
}
