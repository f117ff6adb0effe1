use crate::{config::Config, server::Server, survey::config::SurveyConfig};

/// Test server builder backed by an in-memory SQLite database
pub struct TestServerBuilder {
    config: Config,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Override the accepted age range
    pub fn with_survey_rules(mut self, rules: SurveyConfig) -> Self {
        self.config.survey = rules;
        self
    }

    pub async fn build(self) -> Server {
        let mut config = self.config;

        config.database.url = "sqlite::memory:".to_string();
        // Each pooled connection would otherwise open its own empty database
        config.database.max_connections = 1;

        config.metrics.enabled = false;

        let server = Server::new(config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
