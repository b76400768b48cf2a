//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request path against a preprocessed path template
//! - Bind `{name}` segments to path parameters
//! - Negotiate Accept against the media types a route produces
//! - Negotiate Content-Type against the media types a route consumes
//!
//! # Design Decisions
//! - Segment counts compared first (cheapest discriminator)
//! - No trailing-slash normalization, no prefix matching
//! - Paths are percent-decoded once, before splitting
//! - Media types match by substring containment, not set membership
//! - Empty list or a leading `*/*` = always matches (wildcard)

use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Path parameter name (without braces) to the matched request segment.
pub type PathParameters = HashMap<String, String>;

/// Wildcard media range meaning "any media type".
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// A path template split into its `/`-separated segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    segments: Vec<String>,
}

impl PathTemplate {
    /// Split a template like `/users/{id}` into segments.
    ///
    /// Empty segments are kept, so `/users` yields `["", "users"]`.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let segments = template.split('/').map(str::to_string).collect();
        Self { template, segments }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the bound parameters if `path` matches this template.
    pub fn matches(&self, path: &str) -> Option<PathParameters> {
        match_path(&self.segments, path)
    }
}

/// Match a request path against template segments.
///
/// A template segment starting with `{` binds the request segment under its
/// name; a repeated name keeps the last value. Any other segment must be
/// equal to the request segment.
pub fn match_path<S: AsRef<str>>(segments: &[S], path: &str) -> Option<PathParameters> {
    let request_segments: Vec<&str> = path.split('/').collect();
    if segments.len() != request_segments.len() {
        return None;
    }

    let mut params = PathParameters::new();
    for (key, value) in segments.iter().zip(request_segments) {
        let key = key.as_ref();
        if key.starts_with('{') {
            let name = key.trim_matches(|c: char| c == '{' || c == '}');
            params.insert(name.to_string(), value.to_string());
        } else if key != value {
            return None;
        }
    }

    Some(params)
}

/// Percent-decode a request path. Invalid UTF-8 is replaced, malformed escapes are kept.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// Returns true if the route accepts any media type.
pub fn is_any_media_type(media_types: &str) -> bool {
    media_types.is_empty() || media_types.starts_with(ANY_MEDIA_TYPE)
}

/// Returns whether one of the Accept candidates is something the route produces.
pub fn matches_accept(produces: &str, accept: &str) -> bool {
    negotiate_accept(produces, accept).is_some()
}

/// Pick the media type the handler should respond with.
///
/// Each Accept candidate is stripped of its `;` parameters and tested for
/// containment in `produces`. The first hit wins. With a wildcard producer
/// the first candidate is returned as-is; an empty hit falls back to the
/// first media type the route produces.
pub fn negotiate_accept(produces: &str, accept: &str) -> Option<String> {
    if is_any_media_type(produces) {
        return Some(bare_media_type(first_candidate(accept)).to_string());
    }

    accept
        .split(',')
        .map(bare_media_type)
        .find(|candidate| produces.contains(candidate))
        .map(|candidate| {
            if candidate.is_empty() {
                first_candidate(produces).to_string()
            } else {
                candidate.to_string()
            }
        })
}

/// Returns whether one of the Content-Type candidates is something the route consumes.
///
/// Unlike Accept, candidates keep their `;` parameters.
pub fn matches_content_type(consumes: &str, content_type: &str) -> bool {
    if is_any_media_type(consumes) {
        return true;
    }

    content_type
        .split(',')
        .map(str::trim)
        .any(|candidate| consumes.contains(candidate))
}

fn first_candidate(list: &str) -> &str {
    list.split(',').next().unwrap_or_default().trim()
}

fn bare_media_type(candidate: &str) -> &str {
    candidate.split(';').next().unwrap_or_default().trim()
}
