//! GDPR data operation endpoints.
//!
//! Export and deletion requests are asynchronous server-side: each returns
//! a [`DataJob`] that can be polled until it completes. Export jobs expose
//! a download URL once finished; deletion jobs are irreversible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::HavenClient;
use crate::clients::ApiError;

/// The kind of data operation a job performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataJobKind {
    /// Collect all data held about a user into a downloadable archive.
    Export,
    /// Permanently delete all data held about a user.
    Deletion,
}

/// Lifecycle state of a data job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataJobStatus {
    /// Accepted, not yet started.
    Pending,
    /// Currently running.
    Processing,
    /// Finished successfully.
    Completed,
    /// Finished with an error; the job can be re-requested.
    Failed,
}

/// An asynchronous GDPR data job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataJob {
    /// Unique job identifier.
    pub id: String,
    /// What the job does.
    pub kind: DataJobKind,
    /// Current lifecycle state.
    pub status: DataJobStatus,
    /// The user the job operates on.
    pub user_id: String,
    /// When the job was requested.
    pub requested_at: DateTime<Utc>,
    /// When the job finished, if it has.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Time-limited archive URL for completed export jobs.
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserRef<'a> {
    user_id: &'a str,
}

impl HavenClient {
    /// Requests an export of all data held about a user.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn request_data_export(&self, user_id: &str) -> Result<DataJob, ApiError> {
        self.post("gdpr/export", &UserRef { user_id }).await
    }

    /// Requests deletion of all data held about a user.
    ///
    /// Deletion is irreversible once the job completes.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] if the request fails.
    pub async fn request_data_deletion(&self, user_id: &str) -> Result<DataJob, ApiError> {
        self.post("gdpr/delete", &UserRef { user_id }).await
    }

    /// Fetches the current state of a data job.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such job exists, or another
    /// classified [`ApiError`] if the request fails.
    pub async fn get_data_job(&self, id: &str) -> Result<DataJob, ApiError> {
        let path = format!("gdpr/jobs/{}", urlencoding::encode(id));
        self.get(&path, None).await
    }
}
