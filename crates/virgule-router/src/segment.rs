/// Segment classification for convention-derived routes
///
/// Turns raw path segments into typed kinds. Everything here is pure: same
/// segment in, same kind out, no I/O.

/// The three things a path segment can mean in the routing convention
///
/// # Examples
///
/// ```
/// use virgule_router::{classify_segment, SegmentKind};
///
/// // Literal text
/// let seg = classify_segment("users");
/// assert!(matches!(seg, SegmentKind::Literal(_)));
///
/// // Named path parameter
/// let seg = classify_segment("_user");
/// assert!(matches!(seg, SegmentKind::Param(_)));
///
/// // Collapses into the parent directory
/// assert_eq!(classify_segment("index"), SegmentKind::Collapse);
/// assert_eq!(classify_segment("_"), SegmentKind::Collapse);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// `index` or the bare `_` alias: stands for the parent directory itself
    /// and contributes nothing to the URI
    Collapse,
    /// `_name`: a named path parameter, rendered as `:name`
    Param(String),
    /// Anything else: literal text, kept verbatim
    Literal(String),
}

/// Classifies one path segment (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. Empty, `index`, or the lone `_` → [`SegmentKind::Collapse`]
/// 2. Leading underscore (`_name`) → [`SegmentKind::Param`] named `name`
/// 3. Anything else → [`SegmentKind::Literal`]
///
/// Only a *leading* underscore aliases a segment; underscores elsewhere in
/// the name are plain characters (`_user_id` is the parameter `user_id`,
/// `user_id` is a literal). The rules apply uniformly to directory names and
/// file stems.
///
/// # Examples
///
/// ```
/// use virgule_router::{classify_segment, SegmentKind};
///
/// assert_eq!(
///     classify_segment("_user_id"),
///     SegmentKind::Param("user_id".to_string())
/// );
/// assert_eq!(
///     classify_segment("user_id"),
///     SegmentKind::Literal("user_id".to_string())
/// );
/// ```
pub fn classify_segment(segment: &str) -> SegmentKind {
    if segment.is_empty() || segment == "_" || segment == "index" {
        return SegmentKind::Collapse;
    }

    match segment.strip_prefix('_') {
        Some(name) => SegmentKind::Param(name.to_string()),
        None => SegmentKind::Literal(segment.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literal() {
        assert_eq!(
            classify_segment("users"),
            SegmentKind::Literal("users".to_string())
        );
    }

    #[test]
    fn test_classify_param() {
        assert_eq!(
            classify_segment("_user"),
            SegmentKind::Param("user".to_string())
        );
    }

    #[test]
    fn test_classify_index_collapses() {
        assert_eq!(classify_segment("index"), SegmentKind::Collapse);
    }

    #[test]
    fn test_classify_bare_underscore_collapses() {
        assert_eq!(classify_segment("_"), SegmentKind::Collapse);
    }

    #[test]
    fn test_classify_empty_collapses() {
        assert_eq!(classify_segment(""), SegmentKind::Collapse);
    }

    #[test]
    fn test_inner_underscores_stay_literal() {
        assert_eq!(
            classify_segment("user_id"),
            SegmentKind::Literal("user_id".to_string())
        );
    }

    #[test]
    fn test_param_keeps_inner_underscores() {
        assert_eq!(
            classify_segment("_user_id"),
            SegmentKind::Param("user_id".to_string())
        );
    }
}
