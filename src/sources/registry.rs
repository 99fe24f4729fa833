use crate::config::Config;
use crate::domain::SourceKind;
use crate::errors::NewsResult;
use crate::sources::guardian::GuardianSource;
use crate::sources::http::build_client;
use crate::sources::newsapi::NewsApiSource;
use crate::sources::nytimes::NyTimesSource;
use crate::sources::traits::NewsSource;

pub struct SourceRegistry {
    sources: Vec<Box<dyn NewsSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register the three HTTP sources, sharing one client
    pub fn from_config(config: &Config) -> NewsResult<Self> {
        let client = build_client(config.timeout)?;
        let mut registry = Self::new();

        registry.register(Box::new(NewsApiSource::new(
            client.clone(),
            config.newsapi_url.clone(),
            config.newsapi_key.clone(),
        )));
        registry.register(Box::new(GuardianSource::new(
            client.clone(),
            config.guardian_url.clone(),
            config.guardian_key.clone(),
        )));
        registry.register(Box::new(NyTimesSource::new(
            client,
            config.nyt_url.clone(),
            config.nyt_key.clone(),
        )));

        Ok(registry)
    }

    /// Registering a second source of the same kind replaces the first
    pub fn register(&mut self, source: Box<dyn NewsSource>) {
        let kind = source.kind();
        self.sources.retain(|s| s.kind() != kind);
        self.sources.push(source);
    }

    pub fn find(&self, kind: SourceKind) -> Option<&dyn NewsSource> {
        self.sources
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| s.as_ref())
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::traits::MockNewsSource;

    fn mock(kind: SourceKind) -> Box<dyn NewsSource> {
        let mut source = MockNewsSource::new();
        source.expect_kind().return_const(kind);
        Box::new(source)
    }

    #[test]
    fn test_from_config_registers_all_sources() {
        let config = Config::from_lookup(|_| None).unwrap();
        let registry = SourceRegistry::from_config(&config).unwrap();

        assert_eq!(
            registry.kinds(),
            vec![SourceKind::NewsApi, SourceKind::Guardian, SourceKind::NyTimes]
        );
    }

    #[test]
    fn test_find_by_kind() {
        let mut registry = SourceRegistry::new();
        registry.register(mock(SourceKind::Guardian));

        assert!(registry.find(SourceKind::Guardian).is_some());
        assert!(registry.find(SourceKind::NewsApi).is_none());
    }

    #[test]
    fn test_register_replaces_same_kind() {
        let mut registry = SourceRegistry::new();
        registry.register(mock(SourceKind::NyTimes));
        registry.register(mock(SourceKind::NyTimes));

        assert_eq!(registry.kinds(), vec![SourceKind::NyTimes]);
    }

    #[test]
    fn test_empty_registry() {
        assert!(SourceRegistry::default().is_empty());
    }
}
