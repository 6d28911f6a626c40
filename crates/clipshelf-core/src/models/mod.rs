//! Domain models
//!
//! Request-scoped values only; nothing here is persisted.

pub mod storage;
pub mod video;

pub use storage::StoredObject;
pub use video::{
    collect_videos, display_name, has_video_extension, PresignedUrlQuery, PresignedUrlResponse,
    VideoDescriptor, VideoListResponse,
};
