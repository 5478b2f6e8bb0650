/// Batching configuration
///
/// Defaults produce the smallest useful loader: one observation per batch,
/// deterministic order, final short batch emitted.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchConfig {
    /// Number of observations per batch
    pub batch_size: usize,

    /// Whether to reshuffle observation order at the start of each pass
    pub shuffle: bool,

    /// Whether a final batch shorter than `batch_size` is emitted
    pub partial: bool,

    /// Optional seed for reproducible shuffling
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            shuffle: false,
            partial: true,
            seed: None,
        }
    }
}

impl BatchConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn partial(mut self, p: bool) -> Self {
        self.partial = p;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.batch_size == 0 {
            return Err(crate::BatchError::InvalidArgument(
                "batch_size must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.batch_size, 1);
        assert!(!config.shuffle);
        assert!(config.partial);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_chain() {
        let config = BatchConfig::default()
            .batch_size(64)
            .shuffle(true)
            .partial(false)
            .seed(7);
        assert_eq!(config.batch_size, 64);
        assert!(config.shuffle);
        assert!(!config.partial);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = BatchConfig::default().batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "batch_size": 16,
            "shuffle": true,
            "partial": false
        }"#;

        let config: BatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.batch_size, 16);
        assert!(config.shuffle);
        assert!(!config.partial);
        assert_eq!(config.seed, None);
    }
}
