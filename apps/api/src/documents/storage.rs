//! Upload storage: local directory by default, S3 / MinIO when a bucket is configured.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, S3Config};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("Upload not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// Where uploaded CVs and job descriptions are kept.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Stores `bytes` under `name`, replacing any previous upload of that name.
    async fn put(&self, name: &str, bytes: Bytes) -> Result<(), StorageError>;
    async fn get(&self, name: &str) -> Result<Bytes, StorageError>;
    /// Human-readable location, for logs.
    fn location(&self, name: &str) -> String;
}

/// Reduces a client-supplied file name to its final path component.
pub fn sanitize_filename(raw: &str) -> Result<String, StorageError> {
    let normalized = raw.replace('\\', "/");
    let name = normalized.rsplit('/').next().unwrap_or("").trim();
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidName(raw.to_string()));
    }
    Ok(name.to_string())
}

pub struct LocalUploadStore {
    root: PathBuf,
}

impl LocalUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(sanitize_filename(name)?))
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn put(&self, name: &str, bytes: Bytes) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, &bytes).await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Bytes, StorageError> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn location(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }
}

pub struct S3UploadStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
}

impl S3UploadStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: "uploads".to_string(),
        }
    }

    fn key_for(&self, name: &str) -> Result<String, StorageError> {
        Ok(format!("{}/{}", self.prefix, sanitize_filename(name)?))
    }
}

#[async_trait]
impl UploadStore for S3UploadStore {
    async fn put(&self, name: &str, bytes: Bytes) -> Result<(), StorageError> {
        let key = self.key_for(name)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type_for(name))
            .send()
            .await
            .map_err(|e| StorageError::S3(format!("upload of {key} failed: {e}")))?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Bytes, StorageError> {
        let key = self.key_for(name)?;
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    return Err(StorageError::NotFound(name.to_string()));
                }
                return Err(StorageError::S3(format!("download of {key} failed: {service_err}")));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(format!("reading {key} failed: {e}")))?;
        Ok(data.into_bytes())
    }

    fn location(&self, name: &str) -> String {
        format!("s3://{}/{}/{}", self.bucket, self.prefix, name)
    }
}

/// Content type served for an upload, by extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Picks S3 when a bucket is configured, otherwise the local upload directory.
pub async fn build_upload_store(config: &Config) -> Arc<dyn UploadStore> {
    match &config.s3 {
        Some(s3) => {
            let client = build_s3_client(s3).await;
            info!("Upload store: s3://{}", s3.bucket);
            Arc::new(S3UploadStore::new(client, s3.bucket.clone()))
        }
        None => {
            info!("Upload store: local directory {}", config.upload_dir);
            Arc::new(LocalUploadStore::new(&config.upload_dir))
        }
    }
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3.access_key_id,
        &s3.secret_access_key,
        None,
        None,
        "screener-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(s3.region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &s3.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    let shared = loader.load().await;

    // MinIO needs path-style addressing
    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(s3.endpoint.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_last_component() {
        assert_eq!(sanitize_filename("cv.pdf").unwrap(), "cv.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\jd.csv").unwrap(), "jd.csv");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dots() {
        for bad in ["", "  ", ".", "..", "dir/", "a/.."] {
            assert!(
                matches!(sanitize_filename(bad), Err(StorageError::InvalidName(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for("cv.PDF"), "application/pdf");
        assert_eq!(content_type_for("jd.csv"), "text/csv");
        assert_eq!(content_type_for("blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_local_store_round_trip_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(tmp.path().join("uploads"));

        store
            .put("cv.pdf", Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        let data = store.get("cv.pdf").await.unwrap();
        assert_eq!(&data[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_local_store_overwrites_same_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(tmp.path());
        store.put("jd.csv", Bytes::from_static(b"old")).await.unwrap();
        store.put("jd.csv", Bytes::from_static(b"new")).await.unwrap();
        assert_eq!(&store.get("jd.csv").await.unwrap()[..], b"new");
    }

    #[tokio::test]
    async fn test_local_store_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalUploadStore::new(tmp.path());
        assert!(matches!(
            store.get("missing.pdf").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_store_cannot_escape_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("uploads");
        let store = LocalUploadStore::new(&root);
        store
            .put("../escape.txt", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(root.join("escape.txt").exists());
        assert!(!tmp.path().join("escape.txt").exists());
    }
}
