use std::fmt;

use crate::error::{PathError, Result};
use crate::segments::{part_at, slice_parts, slice_scalar, split_parts};

// ---------------------------------------------------------------------------
// Url
// ---------------------------------------------------------------------------

/// A syntactically valid Uniform Resource Locator.
///
/// Validated once at parse time; the wrapped value is the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url(url::Url);

impl Url {
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = url::Url::parse(input).map_err(|source| PathError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// The URL's path portion as segment parts.
    pub fn path_segments(&self) -> UrlSegments {
        UrlSegments::new(self.0.path().trim_start_matches('/'))
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

// ---------------------------------------------------------------------------
// UrlSegment
// ---------------------------------------------------------------------------

/// A single RFC 3986 URL path segment.
///
/// Requirements, simple and practical: non-empty, no `/`, valid
/// percent-encoding, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlSegment(String);

impl UrlSegment {
    pub fn parse(input: &str) -> Result<Self> {
        let reason = if input.is_empty() {
            Some("segment is empty")
        } else if input.contains('/') {
            Some("contains '/'")
        } else if !valid_percent_encoding(input) {
            Some("invalid percent encoding")
        } else if input.chars().count() > 255 {
            Some("longer than 255 characters")
        } else {
            None
        };

        match reason {
            None => Ok(Self(input.to_string())),
            Some(reason) => Err(PathError::InvalidUrlSegment {
                segment: input.to_string(),
                reason: reason.to_string(),
            }),
        }
    }

    pub(crate) fn new_unchecked<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every `%` must introduce exactly two hex digits.
fn valid_percent_encoding(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// UrlSegments
// ---------------------------------------------------------------------------

/// One or more `/`-joined URL path segments, manipulated as parts through
/// the same engine as [`PathSegments`](crate::PathSegments).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlSegments(String);

impl UrlSegments {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn split(&self) -> Vec<UrlSegment> {
        split_parts(&self.0, '/')
            .into_iter()
            .map(UrlSegment::new_unchecked)
            .collect()
    }

    pub fn segment(&self, index: usize) -> UrlSegment {
        UrlSegment::new_unchecked(part_at(&self.0, '/', index))
    }

    pub fn slice(&self, start: usize, end: Option<usize>) -> Vec<UrlSegment> {
        slice_parts(&self.0, '/', start, end)
            .into_iter()
            .map(UrlSegment::new_unchecked)
            .collect()
    }

    pub fn slice_scalar(&self, start: usize, end: Option<usize>) -> UrlSegments {
        Self(slice_scalar(&self.0, '/', start, end))
    }

    pub fn len(&self) -> usize {
        split_parts(&self.0, '/').len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UrlSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
