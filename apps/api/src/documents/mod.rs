// Document collaborators: turning uploaded bytes into raw text and keeping the uploads.

pub mod extract;
pub mod storage;

pub use extract::{ExtractionError, FileTextSource, TextSource};
pub use storage::{build_upload_store, sanitize_filename, StorageError, UploadStore};
