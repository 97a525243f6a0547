use http::Extensions;
use std::fmt::{self, Debug, Formatter};

/// Shared state registered through [`RouterBuilder::data`](./struct.RouterBuilder.html#method.data), one value per type.
#[derive(Default)]
pub(crate) struct DataMap {
    inner: Extensions,
}

impl DataMap {
    pub(crate) fn new() -> DataMap {
        DataMap::default()
    }

    pub(crate) fn insert<T: Clone + Send + Sync + 'static>(&mut self, val: T) {
        self.inner.insert(val);
    }

    pub(crate) fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner.get::<T>()
    }
}

impl Debug for DataMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DataMap {{ entries: {} }}", self.inner.len())
    }
}
