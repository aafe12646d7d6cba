//! New Relic deployment markers

use serde::Serialize;

use super::HttpTransport;
use crate::domain::Secret;
use crate::error::Result;

/// One deployment record for the New Relic v1 deployments API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelicNotification {
    pub endpoint: String,
    pub api_key: Secret,
    pub app_name: String,
    pub revision: String,
    pub user: String,
}

impl NewRelicNotification {
    pub fn form(&self) -> Vec<(String, String)> {
        vec![
            ("deployment[app_name]".to_string(), self.app_name.clone()),
            ("deployment[revision]".to_string(), self.revision.clone()),
            ("deployment[user]".to_string(), self.user.clone()),
        ]
    }

    pub fn send(&self, transport: &mut dyn HttpTransport) -> Result<()> {
        tracing::info!(
            "recording New Relic deployment for {} at revision {}",
            self.app_name,
            self.revision
        );
        transport.post_form(
            &self.endpoint,
            &[("x-api-key", self.api_key.expose())],
            &self.form(),
        )
    }
}
