//! Extractors that render their rejections as [`crate::ErrorResponse`] bodies.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
