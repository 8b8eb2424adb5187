//! Bidirectional mapping between location paths and view-filter routes.

/// The parsed representation of the current view-filter location.
///
/// A closed set of four variants carrying no data. [`Route::NotFound`] is
/// reachable only via unparseable paths; it is a valid terminal state, not
/// an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Show every todo.
    All,
    /// Show only incomplete todos.
    Active,
    /// Show only completed todos.
    Completed,
    /// The path did not resolve to any filter.
    NotFound,
}

impl Route {
    /// Parses a location path into a route.
    ///
    /// Matching is segment based: the path is split on `/` and empty
    /// segments are dropped, so `"/active"`, `"active"`, and `"/active/"`
    /// all resolve to [`Route::Active`]. A pattern must consume the whole
    /// path — trailing segments are not permitted — and unmatched input
    /// yields [`Route::NotFound`].
    ///
    /// ```
    /// use todos_core::Route;
    ///
    /// assert_eq!(Route::parse(""), Route::All);
    /// assert_eq!(Route::parse("/active"), Route::Active);
    /// assert_eq!(Route::parse("/active/extra"), Route::NotFound);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (None, _) => Self::All,
            (Some("active"), None) => Self::Active,
            (Some("completed"), None) => Self::Completed,
            _ => Self::NotFound,
        }
    }

    /// Canonical path for the route, used to build navigation links.
    ///
    /// [`Route::NotFound`] has no canonical path and is never formatted.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::All => Some(""),
            Self::Active => Some("active"),
            Self::Completed => Some("completed"),
            Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_path_is_all() {
        assert_eq!(Route::parse(""), Route::All);
        assert_eq!(Route::parse("/"), Route::All);
    }

    #[test]
    fn parse_named_routes() {
        assert_eq!(Route::parse("/active"), Route::Active);
        assert_eq!(Route::parse("/completed"), Route::Completed);
    }

    #[test]
    fn parse_ignores_empty_segments() {
        assert_eq!(Route::parse("active"), Route::Active);
        assert_eq!(Route::parse("/active/"), Route::Active);
        assert_eq!(Route::parse("//completed"), Route::Completed);
    }

    #[test]
    fn parse_requires_full_match() {
        assert_eq!(Route::parse("/active/extra"), Route::NotFound);
        assert_eq!(Route::parse("/completed/x/y"), Route::NotFound);
    }

    #[test]
    fn parse_unknown_path_is_not_found() {
        assert_eq!(Route::parse("/unknown"), Route::NotFound);
    }

    #[test]
    fn format_parse_round_trips_named_routes() {
        for route in [Route::All, Route::Active, Route::Completed] {
            #[allow(clippy::unwrap_used)]
            let path = route.path().unwrap();
            assert_eq!(Route::parse(path), route);
        }
    }

    #[test]
    fn not_found_has_no_canonical_path() {
        assert_eq!(Route::NotFound.path(), None);
    }
}
