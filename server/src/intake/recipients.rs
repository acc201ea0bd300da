//! Who receives the restaurant-facing email.

use std::sync::Arc;
use supperclub_core::{BusinessId, SettingsRepository};
use tracing::{debug, warn};

/// Picks the restaurant recipient list.
///
/// # Order
///
/// 1. The business's settings row, if it lists at least one address
/// 2. The configured fallback address
/// 3. Nobody
///
/// A settings list is used on its own, never merged with the fallback.
#[derive(Clone)]
pub struct RecipientResolver {
    settings: Arc<dyn SettingsRepository>,
    fallback: Option<String>,
}

impl RecipientResolver {
    /// Create a resolver with an optional fallback address.
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsRepository>, fallback: Option<String>) -> Self {
        Self { settings, fallback }
    }

    /// Resolve recipients for `business_id`.
    pub async fn resolve(&self, business_id: Option<BusinessId>) -> Vec<String> {
        if let Some(business_id) = business_id {
            match self.settings.find_for_business(business_id).await {
                Ok(Some(settings)) => {
                    let recipients = settings.recipients();
                    if !recipients.is_empty() {
                        debug!(business_id = %business_id, count = recipients.len(), "Using configured recipients");
                        return recipients;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(business_id = %business_id, error = %e, "Failed to load reservation settings");
                }
            }
        }

        match &self.fallback {
            Some(address) => {
                debug!(to = %address, "Using fallback recipient");
                vec![address.clone()]
            }
            None => Vec::new(),
        }
    }
}

impl std::fmt::Debug for RecipientResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipientResolver")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
