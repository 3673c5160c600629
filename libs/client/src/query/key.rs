//! Cache keys

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::gateway::{to_query_params, QueryParams};

/// Identity of one cached read.
///
/// `resource` is the invalidation partition (`claims`, `members`, `drugs`,
/// `pharmacies`, `analytics`), `scope` names the operation inside it (`list`,
/// `detail`, `search`, `dashboard`, ...). Parameters are kept sorted, so two
/// keys built from the same values in a different order are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: String,
    scope: String,
    params: QueryParams,
}

impl QueryKey {
    pub fn new(resource: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            scope: scope.into(),
            params: QueryParams::new(),
        }
    }

    /// Key whose parameters are the flattened fields of `params`
    pub fn with_params<P: Serialize + ?Sized>(
        resource: impl Into<String>,
        scope: impl Into<String>,
        params: &P,
    ) -> Result<Self> {
        Ok(Self {
            resource: resource.into(),
            scope: scope.into(),
            params: to_query_params(params)?,
        })
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    /// `resource/scope?k1=v1&k2=v2`, values URL-encoded
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource, self.scope)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={}", urlencoding::encode(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_order_does_not_matter() {
        let a = QueryKey::with_params("claims", "list", &json!({"page": 1, "status": "paid"})).unwrap();
        let b = QueryKey::new("claims", "list")
            .param("status", "paid")
            .param("page", 1);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_display_is_canonical() {
        let key = QueryKey::with_params(
            "members",
            "list",
            &json!({"search": "o'neil & co", "page": 2, "is_active": null}),
        )
        .unwrap();
        assert_eq!(key.to_string(), "members/list?page=2&search=o%27neil%20%26%20co");
    }

    #[test]
    fn test_display_without_params() {
        assert_eq!(QueryKey::new("analytics", "dashboard").to_string(), "analytics/dashboard");
    }

    #[test]
    fn test_partitions_differ() {
        let claims = QueryKey::new("claims", "detail").param("id", 3);
        let drugs = QueryKey::new("drugs", "detail").param("id", 3);
        assert_ne!(claims, drugs);
        assert_eq!(claims.resource(), "claims");
        assert_eq!(claims.scope(), "detail");
        assert_eq!(claims.params().get("id").map(String::as_str), Some("3"));
    }
}
