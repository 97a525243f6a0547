use super::{default_not_found, Router};
use crate::context::Context;
use crate::data_map::DataMap;
use crate::middleware::{ScopeId, ScopeTable};
use crate::route::{Handler, Registry};
use http::Method;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Builder for the [Router](./struct.Router.html) type.
///
/// Routes and middlewares attached directly to the builder belong to the root scope, whose prefix is empty, so its
/// middlewares run for every request. Use [`scope`](#method.scope) or [`group`](#method.group) to create a
/// prefixed scope.
///
/// The first error raised while building, e.g. an invalid route pattern, is kept and returned from
/// [`build`](#method.build); everything registered after it is ignored.
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{Context, Router};
///
/// fn home_handler(ctx: &mut Context) {
///     ctx.respond(StatusCode::OK, "home");
/// }
///
/// fn book_handler(ctx: &mut Context) {
///     let body = format!("Show book: {}", ctx.param("bookId").unwrap_or_default());
///     ctx.respond(StatusCode::OK, body);
/// }
///
/// # fn run() -> routetree::Result<Router> {
/// let router = Router::builder()
///     .get("/", home_handler)
///     .scope("/api", |api| {
///         api.middleware(|ctx: &mut Context| ctx.next())
///             .get("/books/:bookId", book_handler);
///     })
///     .build()?;
/// # Ok(router)
/// # }
/// # run().unwrap();
/// ```
pub struct RouterBuilder {
    inner: crate::Result<BuilderInner>,
}

#[derive(Debug)]
struct BuilderInner {
    registry: Registry,
    scopes: ScopeTable,
    data: DataMap,
    not_found: Option<Handler>,
}

impl BuilderInner {
    fn add_route(&mut self, scope: ScopeId, method: Method, path: &str, handler: Handler) -> crate::Result<()> {
        let pattern = format!("{}{}", self.scopes.prefix(scope), path);
        self.registry.register(method, &pattern, handler)
    }
}

impl RouterBuilder {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Router> {
        let inner = self.inner?;

        let router = Router {
            registry: inner.registry,
            scopes: inner.scopes,
            data: Arc::new(inner.data),
            not_found: inner.not_found.unwrap_or_else(|| Handler::new(default_not_found)),
        };

        tracing::debug!(
            routes = router.routes().len(),
            scopes = router.scopes.len(),
            "router built"
        );
        Ok(router)
    }

    fn update<F>(&mut self, func: F)
    where
        F: FnOnce(&mut BuilderInner) -> crate::Result<()>,
    {
        if let Ok(inner) = self.inner.as_mut() {
            if let Err(err) = func(inner) {
                self.inner = Err(err);
            }
        }
    }

    fn and_then<F>(mut self, func: F) -> Self
    where
        F: FnOnce(&mut BuilderInner) -> crate::Result<()>,
    {
        self.update(func);
        self
    }

    fn create_scope(&mut self, parent: ScopeId, prefix: &str) -> ScopeId {
        match self.inner.as_mut() {
            Ok(inner) => inner.scopes.create(parent, prefix),
            Err(_) => ScopeId::ROOT,
        }
    }

    fn scope_prefix(&self, id: ScopeId) -> &str {
        match self.inner.as_ref() {
            Ok(inner) => inner.scopes.prefix(id),
            Err(_) => "",
        }
    }

    fn push_route<P, H>(&mut self, scope: ScopeId, method: Method, path: P, handler: H)
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        let handler = Handler::new(handler);
        self.update(move |inner| inner.add_route(scope, method, path.as_ref(), handler));
    }

    fn push_middleware<H>(&mut self, scope: ScopeId, handler: H)
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        let handler = Handler::new(handler);
        self.update(move |inner| {
            inner.scopes.push_middleware(scope, handler);
            Ok(())
        });
    }
}

impl RouterBuilder {
    /// Adds a new route with `GET` method and the handler at the specified path.
    pub fn get<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::GET, handler)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::POST, handler)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::PUT, handler)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::DELETE, handler)
    }

    /// Adds a new route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::PATCH, handler)
    }

    /// Adds a new route with `HEAD` method and the handler at the specified path.
    pub fn head<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::HEAD, handler)
    }

    /// Adds a new route with `OPTIONS` method and the handler at the specified path.
    pub fn options<P, H>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::OPTIONS, handler)
    }

    /// Adds a new route with the specified method and the handler at the specified path.
    ///
    /// Registering the same method and path again replaces the earlier handler.
    pub fn add<P, H>(mut self, path: P, method: Method, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.push_route(ScopeId::ROOT, method, path, handler);
        self
    }

    /// Attaches a middleware to the root scope, so it runs for every request.
    pub fn middleware<H>(mut self, handler: H) -> Self
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.push_middleware(ScopeId::ROOT, handler);
        self
    }

    /// Creates a scope with the given prefix and lets `func` register its routes, middlewares and child scopes.
    pub fn scope<P, F>(mut self, prefix: P, func: F) -> Self
    where
        P: AsRef<str>,
        F: FnOnce(&mut Group<'_>),
    {
        let mut group = self.group(prefix);
        func(&mut group);
        self
    }

    /// Creates a scope with the given prefix and returns a handle to it.
    pub fn group<P: AsRef<str>>(&mut self, prefix: P) -> Group<'_> {
        let id = self.create_scope(ScopeId::ROOT, prefix.as_ref());
        Group { builder: self, id }
    }

    /// Specify app data to be shared across route handlers and middlewares.
    ///
    /// One value is kept per type; registering another value of the same type replaces it. Values must be
    /// `Clone`, wrap them in an `Arc` when that is costly.
    pub fn data<T: Clone + Send + Sync + 'static>(self, data: T) -> Self {
        self.and_then(move |inner| {
            inner.data.insert(data);
            Ok(())
        })
    }

    /// Replaces the handler used for requests that match no route, which by default answers
    /// `404 NOT FOUND` in plain text.
    pub fn not_found<H>(self, handler: H) -> Self
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        let handler = Handler::new(handler);
        self.and_then(move |inner| {
            inner.not_found = Some(handler);
            Ok(())
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> RouterBuilder {
        RouterBuilder {
            inner: Ok(BuilderInner {
                registry: Registry::new(),
                scopes: ScopeTable::new(),
                data: DataMap::new(),
                not_found: None,
            }),
        }
    }
}

impl Debug for RouterBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(inner) => write!(f, "{:?}", inner),
            Err(err) => write!(f, "{{ error: {} }}", err),
        }
    }
}

/// A path-prefix scope of a [RouterBuilder](./struct.RouterBuilder.html).
///
/// The prefix of a group is its parent's prefix followed by the prefix it was created with. Routes registered
/// on a group get that prefix prepended, and its middlewares run for every request whose path starts with it,
/// after the middlewares of the scopes created before it.
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{Context, Router};
///
/// # fn run() -> routetree::Result<Router> {
/// let mut builder = Router::builder();
///
/// let mut api = builder.group("/api");
/// api.middleware(|ctx: &mut Context| ctx.next());
///
/// let mut v1 = api.group("/v1");
/// v1.get("/users", |ctx: &mut Context| ctx.respond(StatusCode::OK, "users"));
/// assert_eq!(v1.prefix(), "/api/v1");
///
/// let router = builder.build()?;
/// # Ok(router)
/// # }
/// # run().unwrap();
/// ```
pub struct Group<'a> {
    builder: &'a mut RouterBuilder,
    id: ScopeId,
}

impl Group<'_> {
    /// The full prefix of this group.
    pub fn prefix(&self) -> &str {
        self.builder.scope_prefix(self.id)
    }

    /// Creates a child group whose prefix is appended to this group's prefix.
    pub fn group<P: AsRef<str>>(&mut self, prefix: P) -> Group<'_> {
        let id = self.builder.create_scope(self.id, prefix.as_ref());
        Group {
            builder: &mut *self.builder,
            id,
        }
    }

    /// Creates a child group and lets `func` register its routes, middlewares and child scopes.
    pub fn scope<P, F>(&mut self, prefix: P, func: F) -> &mut Self
    where
        P: AsRef<str>,
        F: FnOnce(&mut Group<'_>),
    {
        let mut child = self.group(prefix);
        func(&mut child);
        self
    }

    /// Attaches a middleware to this group.
    pub fn middleware<H>(&mut self, handler: H) -> &mut Self
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.builder.push_middleware(self.id, handler);
        self
    }

    /// Adds a new route with the specified method and the handler at the group prefix followed by `path`.
    pub fn add<P, H>(&mut self, path: P, method: Method, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.builder.push_route(self.id, method, path, handler);
        self
    }

    /// Adds a new route with `GET` method.
    pub fn get<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::GET, handler)
    }

    /// Adds a new route with `POST` method.
    pub fn post<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::POST, handler)
    }

    /// Adds a new route with `PUT` method.
    pub fn put<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::PUT, handler)
    }

    /// Adds a new route with `DELETE` method.
    pub fn delete<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::DELETE, handler)
    }

    /// Adds a new route with `PATCH` method.
    pub fn patch<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::PATCH, handler)
    }

    /// Adds a new route with `HEAD` method.
    pub fn head<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::HEAD, handler)
    }

    /// Adds a new route with `OPTIONS` method.
    pub fn options<P, H>(&mut self, path: P, handler: H) -> &mut Self
    where
        P: AsRef<str>,
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.add(path, Method::OPTIONS, handler)
    }
}

impl Debug for Group<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ id: {:?}, prefix: {:?} }}", self.id, self.prefix())
    }
}
