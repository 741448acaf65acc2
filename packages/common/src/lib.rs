pub mod storage;

pub use storage::{BlobStore, ContentHash, StorageError};
