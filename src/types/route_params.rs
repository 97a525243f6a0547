use std::collections::hash_map::{HashMap, Iter};

/// Represents a map of the route parameters using the name of the parameter specified in the path as their respective keys.
///
/// Please refer to the [Route Parameters](./index.html#route-parameters) section for more info.
///
/// **Note:** This type shouldn't be created directly. It will be populated into the request context during dispatch
/// and can be accessed through [`Context::params`](./struct.Context.html#method.params).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Sets a new parameter entry with the specified key and the value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.insert(param_name.into(), param_val.into());
    }

    /// Returns the route parameter value mapped with the specified key.
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&str> {
        self.0.get(param_name.as_ref()).map(String::as_str)
    }

    /// Checks if a route parameter exists.
    pub fn has<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.0.contains_key(param_name.as_ref())
    }

    /// Returns the length of the route parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the route parameters map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an [`Iterator`](https://doc.rust-lang.org/std/collections/hash_map/struct.Iter.html) over the parameter entries
    /// as `(parameter_name: &String, parameter_value: &String)`.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RouteParams {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
