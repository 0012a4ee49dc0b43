use crate::error::{CrawlError, CrawlResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Limits and tunables for one crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Deepest task accepted. The seed is depth 0, its items depth 1, their
    /// co-reviewers depth 2.
    pub max_depth: u32,
    /// Total reviewer and item identities that may be claimed.
    pub max_nodes: usize,
    /// Tasks in flight at once.
    pub concurrency: usize,
    /// Per-task limit on each collaborator call.
    pub fetch_timeout_secs: u64,
    /// Wall-clock limit on the whole crawl.
    pub deadline_secs: u64,
    /// Shared items needed before a similarity is reported.
    pub min_overlap: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_nodes: 500,
            concurrency: 4,
            fetch_timeout_secs: 20,
            deadline_secs: 300,
            min_overlap: 1,
        }
    }
}

impl CrawlConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CrawlResult<Self> {
        let data = std::fs::read_to_string(path).map_err(coread_core::Error::from)?;
        let config: CrawlConfig = serde_json::from_str(&data).map_err(coread_core::Error::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CrawlResult<()> {
        if self.max_nodes == 0 {
            return Err(CrawlError::InvalidConfig("max_nodes must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConfig("concurrency must be at least 1".to_string()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(CrawlError::InvalidConfig("fetch_timeout_secs must be positive".to_string()));
        }
        if self.deadline_secs == 0 {
            return Err(CrawlError::InvalidConfig("deadline_secs must be positive".to_string()));
        }
        if self.min_overlap == 0 {
            return Err(CrawlError::InvalidConfig("min_overlap must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_deadline_secs(mut self, secs: u64) -> Self {
        self.deadline_secs = secs;
        self
    }

    pub fn with_min_overlap(mut self, min: usize) -> Self {
        self.min_overlap = min;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_validation() {
        assert!(CrawlConfig::default().with_concurrency(0).validate().is_err());
        assert!(CrawlConfig::default().with_max_nodes(0).validate().is_err());
        assert!(CrawlConfig::default().with_min_overlap(0).validate().is_err());
        assert!(CrawlConfig::default().with_deadline_secs(0).validate().is_err());
        assert!(CrawlConfig::default().with_max_depth(0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_depth": 3, "concurrency": 2}}"#).unwrap();

        let config = CrawlConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.max_nodes, 500);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"concurrency": 0}}"#).unwrap();
        assert!(matches!(
            CrawlConfig::from_json_file(file.path()),
            Err(CrawlError::InvalidConfig(_))
        ));
    }
}
