//! The module descriptor JSON shipped next to a module's script.
//!
//! Field names follow the host app's camelCase wire format; optional fields
//! are omitted entirely rather than serialized as null.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon_url: String,
    pub author: Author,
    pub version: u32,
    pub language: String,
    pub base_url: String,
    pub search_base_url: String,
    pub script_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Slash-joined content types, e.g. "anime/movies" or "manga".
    #[serde(rename = "type")]
    pub content_types: String,
    pub download_support: bool,
    #[serde(rename = "asyncJS")]
    pub async_js: bool,
    #[serde(rename = "streamAsyncJS", skip_serializing_if = "Option::is_none")]
    pub stream_async_js: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub softsub: Option<bool>,
    pub combo: bool,
}

impl ModuleDescriptor {
    /// True when any selected content type plays video streams.
    pub fn is_video(&self) -> bool {
        self.content_types
            .split('/')
            .any(|t| matches!(t, "anime" | "movies" | "shows"))
    }

    /// Serialize with 4-space indentation and a trailing newline, matching
    /// the descriptor files the host app consumes.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        let mut out = String::from_utf8(buf).expect("serde_json emits UTF-8");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModuleDescriptor {
        ModuleDescriptor {
            source_name: "Example".to_string(),
            description: None,
            icon_url: "https://example.com/icon.png".to_string(),
            author: Author {
                name: "someone".to_string(),
                icon: "https://example.com/me.png".to_string(),
                url: None,
            },
            version: 1,
            language: "English".to_string(),
            base_url: "https://example.com".to_string(),
            search_base_url: "https://example.com/search?q=%s".to_string(),
            script_url: "https://example.com/module.js".to_string(),
            stream_type: Some("HLS".to_string()),
            quality: Some("1080p".to_string()),
            content_types: "anime/shows".to_string(),
            download_support: false,
            async_js: true,
            stream_async_js: Some(false),
            softsub: Some(true),
            combo: false,
        }
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = sample().to_pretty_json().unwrap();

        assert!(json.contains("\"sourceName\""));
        assert!(json.contains("\"searchBaseUrl\""));
        assert!(json.contains("\"asyncJS\""));
        assert!(json.contains("\"streamAsyncJS\""));
        assert!(json.contains("\"type\": \"anime/shows\""));
        // Absent optionals are omitted, not null.
        assert!(!json.contains("description"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let descriptor = sample();
        let json = descriptor.to_pretty_json().unwrap();
        let back: ModuleDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_is_video() {
        let mut descriptor = sample();
        assert!(descriptor.is_video());
        descriptor.content_types = "manga/novels".to_string();
        assert!(!descriptor.is_video());
    }
}
