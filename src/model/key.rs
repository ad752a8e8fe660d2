use std::fmt;

/// Identifies a series: every request for one HTTP method on one resource.
///
/// Method and resource are kept apart, so `("GE", "T/x")` and `("G", "ET/x")`
/// never share buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey {
    method: String,
    resource: String,
}

impl StoreKey {
    pub fn new<M, R>(method: M, resource: R) -> Self
    where
        M: Into<String>,
        R: Into<String>,
    {
        Self {
            method: method.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.method, self.resource)
    }
}
