use crate::route::Handler;

/// Index of a scope in the [`ScopeTable`]. The root scope is always `ScopeId::ROOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScopeId(usize);

impl ScopeId {
    pub(crate) const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug)]
struct Scope {
    // Parent prefix + own suffix, fixed at creation.
    prefix: String,
    middlewares: Vec<Handler>,
}

/// Every scope of a router in creation order, starting with the root scope.
#[derive(Debug)]
pub(crate) struct ScopeTable {
    scopes: Vec<Scope>,
}

impl ScopeTable {
    pub(crate) fn new() -> ScopeTable {
        ScopeTable {
            scopes: vec![Scope {
                prefix: String::new(),
                middlewares: Vec::new(),
            }],
        }
    }

    pub(crate) fn create(&mut self, parent: ScopeId, suffix: &str) -> ScopeId {
        let prefix = format!("{}{}", self.prefix(parent), suffix);
        tracing::debug!(prefix = %prefix, "scope created");

        self.scopes.push(Scope {
            prefix,
            middlewares: Vec::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub(crate) fn prefix(&self, id: ScopeId) -> &str {
        &self.scopes[id.0].prefix
    }

    pub(crate) fn push_middleware(&mut self, id: ScopeId, middleware: Handler) {
        self.scopes[id.0].middlewares.push(middleware);
    }

    /// Concatenates the middlewares of every scope whose prefix starts `path`, in scope creation order.
    pub(crate) fn assign(&self, path: &str) -> Vec<Handler> {
        self.scopes
            .iter()
            .filter(|scope| path.starts_with(scope.prefix.as_str()))
            .flat_map(|scope| scope.middlewares.iter().cloned())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::data_map::DataMap;
    use hyper::body::Bytes;
    use hyper::Request;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    fn tag(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Handler {
        let log = log.clone();
        Handler::new(move |ctx: &mut Context| {
            log.lock().unwrap().push(name);
            ctx.next();
        })
    }

    fn run(table: &ScopeTable, path: &str) {
        let req = Request::builder().uri(path).body(Bytes::new()).unwrap();
        let mut ctx = Context::new(
            req,
            path.to_owned(),
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(DataMap::new()),
        );
        ctx.assign(table.assign(path), None, Default::default());
        ctx.next();
    }

    #[test]
    fn should_compose_prefixes_at_creation() {
        let mut table = ScopeTable::new();
        let api = table.create(ScopeId::ROOT, "/api");
        let v1 = table.create(api, "/v1");

        assert_eq!(table.prefix(ScopeId::ROOT), "");
        assert_eq!(table.prefix(api), "/api");
        assert_eq!(table.prefix(v1), "/api/v1");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn should_order_parent_middlewares_before_child() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut table = ScopeTable::new();
        let api = table.create(ScopeId::ROOT, "/api");
        let v1 = table.create(api, "/v1");

        table.push_middleware(api, tag(&log, "api-1"));
        table.push_middleware(v1, tag(&log, "v1-1"));
        table.push_middleware(api, tag(&log, "api-2"));
        table.push_middleware(v1, tag(&log, "v1-2"));
        table.push_middleware(ScopeId::ROOT, tag(&log, "root"));

        run(&table, "/api/v1/users");
        assert_eq!(*log.lock().unwrap(), vec!["root", "api-1", "api-2", "v1-1", "v1-2"]);

        log.lock().unwrap().clear();
        run(&table, "/api/users");
        assert_eq!(*log.lock().unwrap(), vec!["root", "api-1", "api-2"]);

        log.lock().unwrap().clear();
        run(&table, "/home");
        assert_eq!(*log.lock().unwrap(), vec!["root"]);
    }

    #[test]
    fn should_match_prefixes_textually() {
        let mut table = ScopeTable::new();
        let api = table.create(ScopeId::ROOT, "/api");
        table.push_middleware(api, Handler::new(|_: &mut Context| {}));

        assert_eq!(table.assign("/apiary").len(), 1);
        assert_eq!(table.assign("/ap").len(), 0);
    }

    #[test]
    fn should_follow_creation_order_not_nesting() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut table = ScopeTable::new();
        let docs = table.create(ScopeId::ROOT, "/docs");
        let api = table.create(ScopeId::ROOT, "/api");
        let nested = table.create(docs, "/api");

        table.push_middleware(nested, tag(&log, "docs-api"));
        table.push_middleware(api, tag(&log, "api"));
        table.push_middleware(docs, tag(&log, "docs"));

        run(&table, "/docs/api/intro");
        assert_eq!(*log.lock().unwrap(), vec!["docs", "docs-api"]);
    }
}
