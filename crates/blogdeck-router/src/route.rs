//! Route records, path patterns, and resolution.

use std::collections::BTreeMap;

use serde::Serialize;

/// Static metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// `None` means the route did not say.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_auth: Option<bool>,
    pub requires_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Kept out of navigation menus.
    pub hidden: bool,
}

impl RouteMeta {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    pub fn public(mut self) -> Self {
        self.requires_auth = Some(false);
        self
    }

    pub fn private(mut self) -> Self {
        self.requires_auth = Some(true);
        self
    }

    pub fn admin(mut self) -> Self {
        self.requires_admin = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Overlay a child's metadata on its parent's. Flags the child leaves
    /// unset are inherited; `requires_admin` sticks once any level sets it.
    fn merged_with(&self, child: &RouteMeta) -> RouteMeta {
        RouteMeta {
            requires_auth: child.requires_auth.or(self.requires_auth),
            requires_admin: self.requires_admin || child.requires_admin,
            title: child.title.clone().or_else(|| self.title.clone()),
            hidden: child.hidden,
        }
    }
}

/// A route record, possibly with nested children.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Absolute pattern. Children with an empty path share the parent's.
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub meta: RouteMeta,
    /// Navigating here lands on this path instead.
    pub redirect: Option<&'static str>,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self {
            path,
            name: Some(name),
            meta,
            ..Default::default()
        }
    }

    pub fn layout(path: &'static str, meta: RouteMeta, children: Vec<Route>) -> Self {
        Self {
            path,
            meta,
            children,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_redirect(mut self, target: &'static str) -> Self {
        self.redirect = Some(target);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    /// `:name(.*)*`: the rest of the path, possibly empty.
    CatchAll(String),
}

#[derive(Debug, Clone)]
struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|seg| match seg.strip_prefix(':') {
                Some(rest) => match rest.find('(') {
                    Some(idx) => Segment::CatchAll(rest[..idx].to_string()),
                    None => Segment::Param(rest.to_string()),
                },
                None => Segment::Static(seg.to_string()),
            })
            .collect();
        Self { segments }
    }

    fn matches(&self, path: &[&str]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    params.insert(name.clone(), path.get(i..).unwrap_or_default().join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    if path.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), (*path.get(i)?).to_string());
                }
            }
        }
        (path.len() == self.segments.len()).then_some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip query and fragment; collapse to a leading-slash form without a
/// trailing slash.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let segments: Vec<&str> = split(&raw[..end]).collect();
    format!("/{}", segments.join("/"))
}

// ─────────────────────────────────────────────────────────────────────────────
// RouteTable
// ─────────────────────────────────────────────────────────────────────────────

/// Result of resolving a path against a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Normalized path that was resolved (after route redirects).
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub params: BTreeMap<String, String>,
    /// Metadata merged from the outermost match to the leaf.
    pub meta: RouteMeta,
    /// Metadata of every matched record, outermost first.
    #[serde(skip)]
    pub matched: Vec<RouteMeta>,
}

impl ResolvedRoute {
    /// Some record matched the path.
    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }
}

#[derive(Debug, Clone)]
struct FlatRoute {
    pattern: Pattern,
    name: Option<&'static str>,
    redirect: Option<&'static str>,
    chain: Vec<RouteMeta>,
}

/// Flattened, ordered route records.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<FlatRoute>,
}

const MAX_REDIRECTS: usize = 8;

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        let mut flat = Vec::new();
        for route in &routes {
            flatten(route, "", &[], &mut flat);
        }
        Self { routes: flat }
    }

    /// Resolve `path`, following route-level redirects.
    ///
    /// An unmatched path resolves with empty metadata.
    pub fn resolve(&self, path: &str) -> ResolvedRoute {
        let mut path = normalize_path(path);
        for _ in 0..MAX_REDIRECTS {
            let segments: Vec<&str> = split(&path).collect();
            let hit = self
                .routes
                .iter()
                .find_map(|route| route.pattern.matches(&segments).map(|params| (route, params)));

            let Some((route, params)) = hit else {
                break;
            };
            if let Some(target) = route.redirect {
                path = normalize_path(target);
                continue;
            }

            let meta = route
                .chain
                .iter()
                .fold(RouteMeta::default(), |acc, m| acc.merged_with(m));
            return ResolvedRoute {
                path,
                name: route.name.map(str::to_string),
                params,
                meta,
                matched: route.chain.clone(),
            };
        }

        ResolvedRoute {
            path,
            name: None,
            params: BTreeMap::new(),
            meta: RouteMeta::default(),
            matched: Vec::new(),
        }
    }

    /// Names and metadata of every named route, in declaration order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, RouteMeta)> + '_ {
        self.routes.iter().filter_map(|route| {
            let meta = route
                .chain
                .iter()
                .fold(RouteMeta::default(), |acc, m| acc.merged_with(m));
            route.name.map(|name| (name, meta))
        })
    }
}

/// Children come before their parent so an empty-path child wins over the
/// layout record it sits in.
fn flatten(route: &Route, parent_path: &str, parent_chain: &[RouteMeta], out: &mut Vec<FlatRoute>) {
    let path = if route.path.is_empty() {
        parent_path
    } else {
        route.path
    };
    let mut chain = parent_chain.to_vec();
    chain.push(route.meta.clone());

    for child in &route.children {
        flatten(child, path, &chain, out);
    }

    out.push(FlatRoute {
        pattern: Pattern::parse(path),
        name: route.name,
        redirect: route.redirect,
        chain,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            Route::layout(
                "/",
                RouteMeta::default(),
                vec![
                    Route::new("", "Home", RouteMeta::titled("Home").public()),
                    Route::new("/article/:id", "Article", RouteMeta::titled("Article").private()),
                ],
            ),
            Route::layout(
                "/admin",
                RouteMeta::default().private(),
                vec![Route::new("/admin/settings", "Settings", RouteMeta::titled("Settings").admin())],
            )
            .with_redirect("/admin/settings"),
            Route::new("/:pathMatch(.*)*", "NotFound", RouteMeta::titled("404")),
        ])
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("article/3/"), "/article/3");
        assert_eq!(normalize_path("/search?keyword=rust#top"), "/search");
        assert_eq!(normalize_path("//a//b"), "/a/b");
    }

    #[test]
    fn test_resolve_empty_child() {
        let resolved = table().resolve("/");
        assert_eq!(resolved.name.as_deref(), Some("Home"));
        assert_eq!(resolved.meta.requires_auth, Some(false));
        assert_eq!(resolved.matched.len(), 2);
    }

    #[test]
    fn test_resolve_params() {
        let resolved = table().resolve("/article/42?from=home");
        assert_eq!(resolved.path, "/article/42");
        assert_eq!(resolved.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(resolved.meta.title.as_deref(), Some("Article"));
    }

    #[test]
    fn test_meta_inherits_from_parent() {
        let resolved = table().resolve("/admin/settings");
        assert_eq!(resolved.meta.requires_auth, Some(true));
        assert!(resolved.meta.requires_admin);
    }

    #[test]
    fn test_route_redirect() {
        let resolved = table().resolve("/admin");
        assert_eq!(resolved.path, "/admin/settings");
        assert_eq!(resolved.name.as_deref(), Some("Settings"));
    }

    #[test]
    fn test_catch_all() {
        let resolved = table().resolve("/no/such/page");
        assert_eq!(resolved.name.as_deref(), Some("NotFound"));
        assert_eq!(
            resolved.params.get("pathMatch").map(String::as_str),
            Some("no/such/page")
        );
        assert_eq!(resolved.meta.requires_auth, None);
    }

    #[test]
    fn test_unmatched() {
        let table = RouteTable::new(vec![Route::new("/login", "Login", RouteMeta::default())]);
        let resolved = table.resolve("/elsewhere");
        assert!(!resolved.is_matched());
        assert_eq!(resolved.meta, RouteMeta::default());
    }

    #[test]
    fn test_param_needs_segment() {
        let table = RouteTable::new(vec![Route::new("/tag/:id", "Tag", RouteMeta::default())]);
        assert!(!table.resolve("/tag").is_matched());
        assert!(!table.resolve("/tag/1/extra").is_matched());
    }
}
