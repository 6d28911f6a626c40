use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::storage::StoredObject;

/// A playable object in the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoDescriptor {
    /// Full object key.
    pub key: String,
    /// Key with the configured prefix stripped.
    pub name: String,
    /// Size in bytes as reported by storage.
    pub size: i64,
}

impl VideoDescriptor {
    pub fn new(key: impl Into<String>, size: i64, prefix: &str) -> Self {
        let key = key.into();
        let name = display_name(&key, prefix).to_string();
        Self { key, name, size }
    }
}

/// Strip `prefix` from `key` when the key actually starts with it.
pub fn display_name<'a>(key: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return key;
    }
    key.strip_prefix(prefix).unwrap_or(key)
}

/// True when `key` ends with `.<ext>` for one of `extensions`, ignoring case.
///
/// `extensions` are expected lowercase and without the leading dot.
pub fn has_video_extension(key: &str, extensions: &[String]) -> bool {
    let lower = key.to_lowercase();
    extensions.iter().any(|ext| {
        lower
            .strip_suffix(ext.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Filter a listing down to videos, preserving the listing order.
pub fn collect_videos<I>(objects: I, prefix: &str, extensions: &[String]) -> Vec<VideoDescriptor>
where
    I: IntoIterator<Item = StoredObject>,
{
    objects
        .into_iter()
        .filter(|obj| has_video_extension(&obj.key, extensions))
        .map(|obj| VideoDescriptor::new(obj.key, obj.size, prefix))
        .collect()
}

/// Body of `GET /api/videos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VideoListResponse {
    pub videos: Vec<VideoDescriptor>,
}

/// Query of `GET /api/videos/url`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PresignedUrlQuery {
    /// Object key to sign. Required; an empty value is rejected.
    #[serde(default)]
    pub key: String,
}

impl PresignedUrlQuery {
    /// Build from raw query pairs. A repeated `key` resolves to its first value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let key = pairs
            .into_iter()
            .find(|(name, _)| name.as_ref() == "key")
            .map(|(_, value)| value.into())
            .unwrap_or_default();
        Self { key }
    }
}

/// Body of `GET /api/videos/url`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrlResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp4() -> Vec<String> {
        vec!["mp4".to_string()]
    }

    #[test]
    fn test_descriptor_strips_prefix() {
        let video = VideoDescriptor::new("videos/clip1.mp4", 1024, "videos/");
        assert_eq!(video.key, "videos/clip1.mp4");
        assert_eq!(video.name, "clip1.mp4");
        assert_eq!(video.size, 1024);
    }

    #[test]
    fn test_descriptor_keeps_key_outside_prefix() {
        let video = VideoDescriptor::new("other/clip1.mp4", 1, "videos/");
        assert_eq!(video.name, "other/clip1.mp4");

        let video = VideoDescriptor::new("clip1.mp4", 1, "");
        assert_eq!(video.name, "clip1.mp4");
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(has_video_extension("a/b.mp4", &mp4()));
        assert!(has_video_extension("a/B.MP4", &mp4()));
        assert!(has_video_extension("a/b.Mp4", &mp4()));
        assert!(!has_video_extension("a/b.mp4.txt", &mp4()));
        assert!(!has_video_extension("a/bmp4", &mp4()));
        assert!(!has_video_extension("a/", &mp4()));
    }

    #[test]
    fn test_collect_videos_filters_and_keeps_order() {
        let objects = vec![
            StoredObject::new("videos/z.mp4", 3),
            StoredObject::new("videos/notes.txt", 10),
            StoredObject::new("videos/A.MP4", 1),
            StoredObject::new("videos/", 0),
        ];

        let videos = collect_videos(objects, "videos/", &mp4());
        let names: Vec<&str> = videos.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["z.mp4", "A.MP4"]);
        assert!(videos
            .iter()
            .all(|v| v.key.to_lowercase().ends_with(".mp4")));
    }

    #[test]
    fn test_query_from_pairs_takes_first_key() {
        let query = PresignedUrlQuery::from_pairs(vec![
            ("other", "x"),
            ("key", "a.mp4"),
            ("key", "b.mp4"),
        ]);
        assert_eq!(query.key, "a.mp4");

        let query = PresignedUrlQuery::from_pairs(Vec::<(String, String)>::new());
        assert!(query.key.is_empty());
    }

    #[test]
    fn test_list_response_shape() {
        let body = VideoListResponse {
            videos: vec![VideoDescriptor::new("videos/clip1.mp4", 42, "videos/")],
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "videos": [{"key": "videos/clip1.mp4", "name": "clip1.mp4", "size": 42}]
            })
        );

        let empty = serde_json::to_value(VideoListResponse::default()).expect("serialize");
        assert_eq!(empty, serde_json::json!({"videos": []}));
    }
}
