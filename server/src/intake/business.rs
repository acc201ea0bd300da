//! Slug to business id lookup.

use std::sync::Arc;
use supperclub_core::{BusinessDirectory, BusinessId};
use tracing::{debug, warn};

/// Resolves the tenant this process serves.
///
/// "Not found" and "lookup failed" both come back as `None`; failures are
/// logged as warnings.
#[derive(Clone)]
pub struct BusinessResolver {
    directory: Arc<dyn BusinessDirectory>,
    default_slug: Arc<str>,
}

impl BusinessResolver {
    /// Create a resolver that falls back to `default_slug`.
    #[must_use]
    pub fn new(directory: Arc<dyn BusinessDirectory>, default_slug: impl Into<String>) -> Self {
        Self {
            directory,
            default_slug: default_slug.into().into(),
        }
    }

    /// The configured slug.
    #[must_use]
    pub fn default_slug(&self) -> &str {
        &self.default_slug
    }

    /// Look up `slug`, or the configured slug when `None`.
    pub async fn resolve(&self, slug: Option<&str>) -> Option<BusinessId> {
        let slug = slug.unwrap_or(&self.default_slug);

        match self.directory.find_by_slug(slug).await {
            Ok(Some(business)) => {
                debug!(slug, business_id = %business.id, "Business resolved");
                Some(business.id)
            }
            Ok(None) => {
                warn!(slug, "Business not found");
                None
            }
            Err(e) => {
                warn!(slug, error = %e, "Business lookup failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for BusinessResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessResolver")
            .field("default_slug", &self.default_slug)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use supperclub_testing::{InMemoryBusinessDirectory, fixtures};

    #[tokio::test]
    async fn test_resolves_default_slug() {
        let business = fixtures::business("supper-club");
        let directory = InMemoryBusinessDirectory::with_business(business.clone());
        let resolver = BusinessResolver::new(Arc::new(directory), "supper-club");

        assert_eq!(resolver.resolve(None).await, Some(business.id));
    }

    #[tokio::test]
    async fn test_explicit_slug_overrides_default() {
        let directory = InMemoryBusinessDirectory::new();
        let other = fixtures::business("jazz-bar");
        directory.insert(other.clone());
        let resolver = BusinessResolver::new(Arc::new(directory), "supper-club");

        assert_eq!(resolver.resolve(Some("jazz-bar")).await, Some(other.id));
        assert_eq!(resolver.resolve(None).await, None);
    }

    #[tokio::test]
    async fn test_lookup_error_is_none() {
        let directory = InMemoryBusinessDirectory::with_business(fixtures::business("supper-club"));
        directory.set_failing(true);
        let resolver = BusinessResolver::new(Arc::new(directory), "supper-club");

        assert_eq!(resolver.resolve(None).await, None);
    }
}
