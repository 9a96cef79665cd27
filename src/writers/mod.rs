pub mod batch_uploader;
pub mod result_encoding;

pub use batch_uploader::{BatchOutcome, BatchUploader, UploadBatch, UploadReport};
pub use result_encoding::ResultEncoding;
