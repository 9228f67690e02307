//! HTTP-backed Drive API client

use async_trait::async_trait;
use bridge_http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::api::DriveApi;
use crate::error::{DriveError, Result};
use crate::types::{
    AuthUrl, Conflict, DriveFile, DriveStats, FolderTreeResponse, SyncOptions, SyncStatusReport,
    SyncSubmission,
};

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    authenticated: bool,
}

#[derive(Debug, Serialize)]
struct CallbackBody<'a> {
    code: &'a str,
    state: &'a str,
}

#[derive(Debug, Serialize)]
struct StartSyncBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<&'a str>,
    full_resync: bool,
    auto_resolve_conflicts: bool,
}

#[derive(Debug, Deserialize)]
struct ConflictsResponse {
    #[serde(default)]
    conflicts: Vec<Conflict>,
}

/// Client for the Cerebrum Drive integration backend
///
/// Wraps an [`HttpClient`] and a base URL, and mirrors the backend's session
/// flag in `authenticated` so hosts can render auth state without a round
/// trip.
///
/// # Example
///
/// ```ignore
/// use drive_api::{DriveApi, DriveClient};
/// use bridge_http::ReqwestHttpClient;
/// use std::sync::Arc;
///
/// let client = DriveClient::new(
///     Arc::new(ReqwestHttpClient::new()),
///     "https://api.cerebrum.example",
/// );
/// let files = client.list_files(None).await?;
/// ```
pub struct DriveClient {
    /// HTTP client for backend requests
    http_client: Arc<dyn HttpClient>,

    /// Backend base URL, normalized without a trailing slash
    base_url: String,

    /// Mirror of the backend session flag
    authenticated: AtomicBool,
}

impl DriveClient {
    /// Create a new client against the given backend base URL
    ///
    /// A trailing slash on `base_url` is normalized away; endpoint paths
    /// always start with `/drive`.
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http_client,
            base_url,
            authenticated: AtomicBool::new(false),
        }
    }

    /// Whether the last observed backend response indicated an active
    /// Drive authorization
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Relaxed)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to the error taxonomy
    fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }

        if response.status == 401 || response.status == 403 {
            return Err(DriveError::AuthRequired);
        }

        Err(DriveError::Api {
            status: response.status,
            message: String::from_utf8_lossy(&response.body).to_string(),
        })
    }

    fn parse<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
        serde_json::from_slice(&response.body).map_err(|e| DriveError::Parse(e.to_string()))
    }

    async fn get(&self, url: String) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Get, url).header("Accept", "application/json");
        let response = self.http_client.execute(request).await?;
        Self::ensure_success(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.get(url).await?;
        Self::parse(&response)
    }

    async fn post<B: Serialize>(&self, url: String, body: &B) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Post, url).json(body)?;
        let response = self.http_client.execute(request).await?;
        Self::ensure_success(response)
    }

    async fn fetch_sync_status(&self, task_id: &str) -> Result<SyncStatusReport> {
        let url = self.endpoint(&format!(
            "/drive/sync/status/{}",
            urlencoding::encode(task_id)
        ));
        self.get_json(url).await
    }

    async fn fetch_files(&self, param: &str, value: Option<&str>) -> Result<Vec<DriveFile>> {
        let url = match value {
            Some(value) => self.endpoint(&format!(
                "/drive/files?{}={}",
                param,
                urlencoding::encode(value)
            )),
            None => self.endpoint("/drive/files"),
        };
        self.get_json(url).await
    }

    async fn fetch_folder_tree(&self, folder_id: Option<&str>) -> Result<FolderTreeResponse> {
        let url = match folder_id {
            Some(id) => self.endpoint(&format!(
                "/drive/folders/tree?folder_id={}",
                urlencoding::encode(id)
            )),
            None => self.endpoint("/drive/folders/tree"),
        };
        self.get_json(url).await
    }
}

#[async_trait]
impl DriveApi for DriveClient {
    /// Propagates failures: the host surfaces them as an alert.
    #[instrument(skip(self))]
    async fn auth_url(&self) -> Result<AuthUrl> {
        info!("Requesting Drive authorization URL");
        self.get_json(self.endpoint("/drive/auth/url")).await
    }

    /// Propagates failures. On success the session mirror flips to
    /// authenticated.
    #[instrument(skip(self, code, state))]
    async fn exchange_code(&self, code: &str, state: &str) -> Result<()> {
        info!("Completing Drive authorization callback");

        self.post(
            self.endpoint("/drive/auth/callback"),
            &CallbackBody { code, state },
        )
        .await?;

        self.authenticated.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Never fails: any underlying failure reports `false`.
    #[instrument(skip(self))]
    async fn check_auth(&self) -> Result<bool> {
        let authenticated = match self
            .get_json::<HealthResponse>(self.endpoint("/drive/health"))
            .await
        {
            Ok(health) => health.authenticated,
            Err(e) => {
                debug!(error = %e, "Drive health check failed, reporting unauthenticated");
                false
            }
        };

        self.authenticated.store(authenticated, Ordering::Relaxed);
        Ok(authenticated)
    }

    /// Propagates failures. On success the session mirror is cleared.
    #[instrument(skip(self))]
    async fn revoke_auth(&self) -> Result<()> {
        info!("Revoking Drive authorization");

        self.post(self.endpoint("/drive/auth/revoke"), &serde_json::json!({}))
            .await?;

        self.authenticated.store(false, Ordering::Relaxed);
        Ok(())
    }

    /// Propagates failures: the host surfaces them as an alert.
    #[instrument(skip(self), fields(full_resync = options.full_resync))]
    async fn start_sync(&self, options: SyncOptions) -> Result<SyncSubmission> {
        info!("Submitting Drive sync task");

        let body = StartSyncBody {
            folder_id: options.folder_id.as_deref(),
            full_resync: options.full_resync,
            auto_resolve_conflicts: true,
        };

        let response = self.post(self.endpoint("/drive/sync"), &body).await?;
        Self::parse(&response)
    }

    /// Never fails: an unreachable status endpoint yields a synthetic
    /// `failed` report so pollers observe a terminal state.
    #[instrument(skip(self), fields(task_id = %task_id))]
    async fn sync_status(&self, task_id: &str) -> Result<SyncStatusReport> {
        match self.fetch_sync_status(task_id).await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(error = %e, "Sync status poll failed, reporting synthetic failure");
                Ok(SyncStatusReport::failed(Some(e.to_string())))
            }
        }
    }

    /// Never fails: falls back to zeroed counters.
    #[instrument(skip(self))]
    async fn user_stats(&self) -> Result<DriveStats> {
        match self.get_json(self.endpoint("/drive/user/stats")).await {
            Ok(stats) => Ok(stats),
            Err(e) => {
                warn!(error = %e, "Stats fetch failed, returning zeroed stats");
                Ok(DriveStats::default())
            }
        }
    }

    /// Never fails: falls back to an empty list.
    #[instrument(skip(self))]
    async fn conflicts(&self) -> Result<Vec<Conflict>> {
        match self
            .get_json::<ConflictsResponse>(self.endpoint("/drive/conflicts"))
            .await
        {
            Ok(response) => Ok(response.conflicts),
            Err(e) => {
                warn!(error = %e, "Conflict listing failed, returning empty list");
                Ok(Vec::new())
            }
        }
    }

    /// Fire-and-forget: failures are logged, never surfaced.
    #[instrument(skip(self))]
    async fn schedule_sync(&self, interval_minutes: u32) -> Result<()> {
        let url = self.endpoint(&format!(
            "/drive/sync/schedule?interval_minutes={}",
            interval_minutes
        ));

        if let Err(e) = self.post(url, &serde_json::json!({})).await {
            warn!(error = %e, interval_minutes, "Failed to schedule recurring sync");
        }

        Ok(())
    }

    /// Never fails: falls back to an empty listing.
    #[instrument(skip(self))]
    async fn list_files(&self, folder_id: Option<String>) -> Result<Vec<DriveFile>> {
        match self.fetch_files("folder_id", folder_id.as_deref()).await {
            Ok(files) => {
                debug!(count = files.len(), "Listed Drive files");
                Ok(files)
            }
            Err(e) => {
                warn!(error = %e, "File listing failed, returning empty listing");
                Ok(Vec::new())
            }
        }
    }

    /// Never fails: falls back to an empty listing.
    #[instrument(skip(self))]
    async fn search_files(&self, query: &str) -> Result<Vec<DriveFile>> {
        match self.fetch_files("query", Some(query)).await {
            Ok(files) => Ok(files),
            Err(e) => {
                warn!(error = %e, "File search failed, returning empty listing");
                Ok(Vec::new())
            }
        }
    }

    /// Never fails: falls back to a synthetic single-node tree.
    #[instrument(skip(self))]
    async fn folder_tree(&self, folder_id: Option<String>) -> Result<FolderTreeResponse> {
        match self.fetch_folder_tree(folder_id.as_deref()).await {
            Ok(tree) => Ok(tree),
            Err(e) => {
                warn!(error = %e, "Folder tree fetch failed, returning fallback root");
                Ok(FolderTreeResponse::fallback(folder_id.as_deref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;
    use bridge_http::HttpError;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        Http {}

        #[async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> bridge_http::Result<HttpResponse>;
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    fn client_with(mock: MockHttp) -> DriveClient {
        DriveClient::new(Arc::new(mock), "https://api.example.com/")
    }

    #[test]
    fn test_base_url_normalization() {
        let client = DriveClient::new(Arc::new(MockHttp::new()), "https://api.example.com///");
        assert_eq!(
            client.endpoint("/drive/health"),
            "https://api.example.com/drive/health"
        );
    }

    #[tokio::test]
    async fn test_auth_url_success() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/auth/url"));
            Ok(json_response(
                200,
                r#"{"auth_url": "https://accounts.example.com/auth", "state": "s1"}"#,
            ))
        });

        let client = client_with(mock);
        let auth = client.auth_url().await.unwrap();

        assert_eq!(auth.auth_url, "https://accounts.example.com/auth");
        assert_eq!(auth.state, "s1");
    }

    #[tokio::test]
    async fn test_auth_url_propagates_failure() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Connect("refused".to_string())));

        let client = client_with(mock);
        assert!(client.auth_url().await.is_err());
    }

    #[tokio::test]
    async fn test_exchange_code_sets_authenticated() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/auth/callback"));
            let body: serde_json::Value =
                serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            assert_eq!(body["code"], "c1");
            assert_eq!(body["state"], "s1");
            Ok(json_response(200, "{}"))
        });

        let client = client_with(mock);
        assert!(!client.is_authenticated());

        client.exchange_code("c1", "s1").await.unwrap();
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_exchange_code_propagates_failure() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(400, "bad code")));

        let client = client_with(mock);
        let result = client.exchange_code("bad", "s1").await;

        assert!(matches!(result, Err(DriveError::Api { status: 400, .. })));
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_reports_server_value() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"authenticated": true}"#)));

        let client = client_with(mock);
        assert!(client.check_auth().await.unwrap());
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_never_fails() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Timeout));

        let client = client_with(mock);
        assert!(!client.check_auth().await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_auth_clears_authenticated() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(2)
            .returning(|_| Ok(json_response(200, r#"{"authenticated": true}"#)));

        let client = client_with(mock);
        client.check_auth().await.unwrap();
        assert!(client.is_authenticated());

        client.revoke_auth().await.unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_start_sync_success() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/sync"));
            let body: serde_json::Value =
                serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            // Conflicts always auto-resolve server-side
            assert_eq!(body["auto_resolve_conflicts"], true);
            assert_eq!(body["full_resync"], false);
            assert!(body.get("folder_id").is_none());

            Ok(json_response(
                200,
                r#"{"task_id": "t1", "status": "pending", "message": "ok"}"#,
            ))
        });

        let client = client_with(mock);
        let submission = client.start_sync(SyncOptions::default()).await.unwrap();

        assert_eq!(submission.task_id, "t1");
        assert_eq!(submission.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_start_sync_propagates_failure() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Connect("refused".to_string())));

        let client = client_with(mock);
        assert!(client.start_sync(SyncOptions::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_start_sync_maps_auth_required() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(401, "unauthorized")));

        let client = client_with(mock);
        let result = client.start_sync(SyncOptions::default()).await;

        assert!(matches!(result, Err(DriveError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_sync_status_success() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/sync/status/t1"));
            Ok(json_response(200, r#"{"status": "running"}"#))
        });

        let client = client_with(mock);
        let report = client.sync_status("t1").await.unwrap();

        assert_eq!(report.status, TaskStatus::Running);
        assert!(report.error_message.is_none());
    }

    #[tokio::test]
    async fn test_sync_status_synthesizes_failure() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Timeout));

        let client = client_with(mock);
        let report = client.sync_status("t1").await.unwrap();

        assert_eq!(report.status, TaskStatus::Failed);
        assert!(report.error_message.is_some());
    }

    #[tokio::test]
    async fn test_user_stats_falls_back_to_zeroed() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(500, "boom")));

        let client = client_with(mock);
        let stats = client.user_stats().await.unwrap();

        assert_eq!(stats, DriveStats::default());
    }

    #[tokio::test]
    async fn test_conflicts_falls_back_to_empty() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Connect("refused".to_string())));

        let client = client_with(mock);
        assert!(client.conflicts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conflicts_unwraps_envelope() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|_| {
            Ok(json_response(
                200,
                r#"{"conflicts": [{
                    "conflict_id": "c1",
                    "conflict_type": "modified_both",
                    "detected_at": "2025-06-01T10:00:00Z",
                    "resolved": false
                }]}"#,
            ))
        });

        let client = client_with(mock);
        let conflicts = client.conflicts().await.unwrap();

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].conflict_id, "c1");
    }

    #[tokio::test]
    async fn test_schedule_sync_swallows_failure() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/sync/schedule?interval_minutes=60"));
            Err(HttpError::Timeout)
        });

        let client = client_with(mock);
        client.schedule_sync(60).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_files_success() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/files?folder_id=f1"));
            Ok(json_response(
                200,
                r#"[{
                    "id": "file1",
                    "name": "daily-report.pdf",
                    "mimeType": "application/pdf",
                    "isFolder": false
                }]"#,
            ))
        });

        let client = client_with(mock);
        let files = client.list_files(Some("f1".to_string())).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, "file1");
    }

    #[tokio::test]
    async fn test_list_files_falls_back_to_empty() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Connect("refused".to_string())));

        let client = client_with(mock);
        assert!(client
            .list_files(Some("root".to_string()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_search_files_encodes_query() {
        let mut mock = MockHttp::new();
        mock.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/drive/files?query=site%20plan"));
            Ok(json_response(200, "[]"))
        });

        let client = client_with(mock);
        assert!(client.search_files("site plan").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_files_falls_back_to_empty() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(HttpError::Timeout));

        let client = client_with(mock);
        assert!(client.search_files("plan").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_folder_tree_falls_back_to_synthetic_root() {
        let mut mock = MockHttp::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(503, "unavailable")));

        let client = client_with(mock);
        let tree = client.folder_tree(None).await.unwrap();

        assert_eq!(tree.id, "root");
        assert!(tree.children.is_empty());
    }
}
