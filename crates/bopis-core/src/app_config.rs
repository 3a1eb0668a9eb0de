#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Ambient configuration for the workspace: service endpoints, tenant
/// identifiers, and HTTP client settings.
///
/// Every field has a default, so an empty environment yields a working
/// config pointed at the production services. None of these values vary
/// per resolution request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the OMS API (postcode and store lookup).
    pub oms_base_url: String,
    /// Base URL of the Maarg API (inventory check).
    pub maarg_base_url: String,
    /// Admin GraphQL endpoint for the draft-order sync path.
    pub admin_graphql_url: String,
    /// Tenant product store id sent with every inventory check.
    pub product_store_id: String,
    /// Facility group id sent with every inventory check.
    pub inventory_group_id: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
