use uuid::Uuid;

#[derive(Clone)]
pub struct AppConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub graphql_endpoint: String,
    pub admin_secret: String,
    /// Ad category the feed is built for.
    pub category_id: Uuid,
    /// Trailing `updated_at` window, in hours.
    pub window_hours: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Storefront origin used for product links and the image proxy.
    pub site_url: String,
    /// Object-storage origin the image proxy reads drafts from.
    pub storage_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("graphql_endpoint", &self.graphql_endpoint)
            .field("admin_secret", &"[redacted]")
            .field("category_id", &self.category_id)
            .field("window_hours", &self.window_hours)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("site_url", &self.site_url)
            .field("storage_url", &self.storage_url)
            .finish()
    }
}
