//! # Router
//!
//! An ordered table of `(pattern, handler)` pairs. The first pattern that
//! matches a path wins; if none does, the mandatory fallback handles it.
//!
//! ## Patterns
//!
//! | Pattern              | Matches                           | Params           |
//! |----------------------|-----------------------------------|------------------|
//! | `/` (exact)          | `/` only                          |                  |
//! | `/`                  | every path                        |                  |
//! | `/create`            | `/create`, `/create/draft`        |                  |
//! | `/create` (exact)    | `/create`, `/create/`             |                  |
//! | `/blogs/:id`         | `/blogs/7`, `/blogs/7/comments`   | `id`             |
//! | `/docs/*`            | `/docs`, `/docs/a/b`              | `*` (remainder)  |
//!
//! Matching is segment-wise. A pattern matches a path that starts with its
//! segments; an exact pattern must also consume the whole path. Empty
//! segments, the query string and the fragment are ignored. A `*` is only
//! special as the last segment, and a bare `:` is a literal.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Rest,
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
    exact: bool,
}

impl Pattern {
    /// A prefix pattern: extra trailing segments in the path are allowed.
    pub fn new(raw: &str) -> Self {
        let parts = split_path(raw);
        let last = parts.len().saturating_sub(1);
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, part)| match part.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ if *part == "*" && i == last => Segment::Rest,
                _ => Segment::Literal(part.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
            exact: false,
        }
    }

    /// A pattern that must match the whole path.
    pub fn exact(raw: &str) -> Self {
        Self {
            exact: true,
            ..Self::new(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches `path` against this pattern, returning captured params.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path);
        let mut params = Params::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Rest => {
                    params.insert("*", parts.get(i..).unwrap_or_default().join("/"));
                    return Some(params);
                }
                Segment::Literal(literal) => {
                    if parts.get(i) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.insert(name, value.to_string());
                }
            }
        }

        (!self.exact || parts.len() == self.segments.len()).then_some(params)
    }
}

impl From<&str> for Pattern {
    fn from(raw: &str) -> Self {
        Pattern::new(raw)
    }
}

/// Path parameters captured by a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn insert(&mut self, name: &str, value: String) {
        self.0.push((name.to_string(), value));
    }
}

/// Result of resolving a path.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub params: Params,
    /// The pattern that matched; `None` when the fallback handled the path.
    pub pattern: Option<&'a str>,
}

impl<H> RouteMatch<'_, H> {
    pub fn is_fallback(&self) -> bool {
        self.pattern.is_none()
    }
}

pub struct Router<H> {
    routes: Vec<(Pattern, H)>,
    fallback: H,
}

impl<H> Router<H> {
    /// An empty table. Every path goes to `fallback` until routes are added.
    pub fn new(fallback: H) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Appends a route. Earlier routes take precedence.
    pub fn route(mut self, pattern: impl Into<Pattern>, handler: H) -> Self {
        self.routes.push((pattern.into(), handler));
        self
    }

    /// Appends a route that only matches the whole path.
    pub fn route_exact(self, pattern: &str, handler: H) -> Self {
        self.route(Pattern::exact(pattern), handler)
    }

    pub fn resolve(&self, path: &str) -> RouteMatch<'_, H> {
        self.routes
            .iter()
            .find_map(|(pattern, handler)| {
                pattern.matches(path).map(|params| RouteMatch {
                    handler,
                    params,
                    pattern: Some(pattern.as_str()),
                })
            })
            .unwrap_or(RouteMatch {
                handler: &self.fallback,
                params: Params::default(),
                pattern: None,
            })
    }
}

/// Drops the query string and fragment, then splits on `/`, skipping empty
/// segments.
fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}
