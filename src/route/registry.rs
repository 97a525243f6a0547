use super::{Handler, Route, RouteMatch};
use crate::tree::{check_pattern, join_segments, parse_pattern, Node, Segment};
use crate::types::RouteParams;
use http::Method;
use std::collections::HashMap;

/// One routing tree per method and the handlers keyed by `(method, pattern)`.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    roots: HashMap<Method, Node>,
    handlers: HashMap<(Method, String), Handler>,
}

impl Registry {
    pub(crate) fn new() -> Registry {
        Registry::default()
    }

    pub(crate) fn register(&mut self, method: Method, pattern: &str, handler: Handler) -> crate::Result<()> {
        check_pattern(pattern)?;

        let parts = parse_pattern(pattern);
        let root = self.roots.entry(method.clone()).or_insert_with(Node::new);

        match root.insert(pattern, &parts, 0) {
            Some(previous) if previous != pattern => {
                tracing::warn!(
                    %method,
                    pattern,
                    replaced = %previous,
                    "route shares its tree path with an earlier pattern and replaces it"
                );
                self.handlers.remove(&(method.clone(), previous));
            }
            Some(_) => tracing::debug!(%method, pattern, "route handler overwritten"),
            None => tracing::debug!(%method, pattern, "route registered"),
        }

        self.handlers.insert((method, pattern.to_owned()), handler);
        Ok(())
    }

    /// Finds the route for `method` and `path`. `None` is a miss, which the caller answers with a 404.
    pub(crate) fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let search_parts = parse_pattern(path);
        let root = self.roots.get(method)?;
        let pattern = root.search(&search_parts, 0)?.pattern()?;
        let handler = self.handlers.get(&(method.clone(), pattern.to_owned()))?;

        let parts = parse_pattern(pattern);
        let mut params = RouteParams::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            match Segment::classify(part) {
                Segment::Named(name) => {
                    if let Some(value) = search_parts.get(i) {
                        params.set(name, *value);
                    }
                }
                Segment::Wildcard(name) => {
                    params.set(name, join_segments(search_parts.get(i..).unwrap_or(&[])));
                    break;
                }
                Segment::Static(_) => {}
            }
        }

        Some(RouteMatch {
            handler,
            pattern,
            params,
        })
    }

    /// Every registered route, grouped by method name and in tree order within a method.
    pub(crate) fn routes(&self) -> Vec<Route> {
        let mut methods: Vec<&Method> = self.roots.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut routes = Vec::new();
        for method in methods {
            let mut patterns = Vec::new();
            self.roots[method].travel(&mut patterns);
            routes.extend(patterns.into_iter().map(|pattern| Route {
                method: method.clone(),
                pattern: pattern.to_owned(),
            }));
        }
        routes
    }
}
