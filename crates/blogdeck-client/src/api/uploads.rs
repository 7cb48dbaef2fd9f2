//! Uploads API.

use reqwest::multipart::{Form, Part};

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{PageResult, Upload, UploadQuery, UploadedFile};

/// Which upload endpoint to use. Each one stores into its own directory and
/// the image variants validate the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    File,
    Image,
    Cover,
    Avatar,
}

impl UploadKind {
    fn path(self) -> &'static str {
        match self {
            UploadKind::File => "upload/file",
            UploadKind::Image => "upload/image",
            UploadKind::Cover => "upload/cover",
            UploadKind::Avatar => "upload/avatar",
        }
    }
}

/// Uploads API client.
pub struct UploadsApi {
    client: BlogClient,
}

impl UploadsApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// List stored uploads.
    pub async fn list(&self, query: &UploadQuery) -> Result<PageResult<Upload>> {
        self.client.get_with_query("upload/list", query).await
    }

    /// Upload file contents as multipart field `file`.
    pub async fn upload(
        &self,
        kind: UploadKind,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<UploadedFile> {
        let part = Part::bytes(bytes).file_name(file_name.into());
        let form = Form::new().part("file", part);
        self.client.post_multipart(kind.path(), form).await
    }

    /// Save an upload record directly.
    pub async fn save(&self, record: &Upload) -> Result<Upload> {
        self.client.post("upload", record).await
    }

    /// Delete an upload.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("upload/{}", id)).await
    }
}
