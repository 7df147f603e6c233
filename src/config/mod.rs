pub mod schema;

pub use schema::{AgentsConfig, Config, IntegrationsConfig, ServerConfig, SessionsConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexported_config_default_is_constructible() {
        let config = Config::default();

        assert!(!config.server.host.is_empty());
        assert!(config.server.port > 0);
        assert!(config.agents.top_recommendations > 0);
    }
}
