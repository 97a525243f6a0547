use crate::Error;

/// A single `/`-delimited component of a route pattern or request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matches the exact text.
    Static(&'a str),
    /// `:name`, binds exactly one path segment.
    Named(&'a str),
    /// `*name`, binds the remainder of the path.
    Wildcard(&'a str),
}

impl<'a> Segment<'a> {
    pub fn classify(text: &'a str) -> Segment<'a> {
        if let Some(name) = text.strip_prefix(':') {
            Segment::Named(name)
        } else if let Some(name) = text.strip_prefix('*') {
            Segment::Wildcard(name)
        } else {
            Segment::Static(text)
        }
    }

    pub fn is_wild(&self) -> bool {
        !matches!(self, Segment::Static(_))
    }
}

/// Splits a pattern or a request path into its non-empty segments.
///
/// A segment starting with `*` is always the last one returned; anything after it
/// is never examined.
pub(crate) fn parse_pattern(pattern: &str) -> Vec<&str> {
    let mut parts = Vec::new();

    for part in pattern.split('/').filter(|part| !part.is_empty()) {
        parts.push(part);
        if part.starts_with('*') {
            break;
        }
    }

    parts
}

pub(crate) fn join_segments(parts: &[&str]) -> String {
    parts.join("/")
}

/// Rejects a pattern whose wildcard segment is followed by more segments, which the
/// parser would otherwise drop silently.
pub(crate) fn check_pattern(pattern: &str) -> crate::Result<()> {
    let mut parts = pattern.split('/').filter(|part| !part.is_empty());

    while let Some(part) = parts.next() {
        if part.starts_with('*') {
            if let Some(rest) = parts.next() {
                return Err(Error::InvalidPattern {
                    pattern: pattern.to_owned(),
                    reason: format!("wildcard segment {:?} must be last, found {:?} after it", part, rest),
                }
                .into());
            }
        }
    }

    Ok(())
}
