use std::env;
use std::num::NonZeroUsize;

/// Sizing for grouped bulk writes.
#[derive(Clone, Copy, Debug)]
pub struct BatchConfig {
    /// Maximum number of writes in flight at once.
    pub group_size: NonZeroUsize,
}

impl BatchConfig {
    pub const DEFAULT_GROUP_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
        Some(size) => size,
        None => unreachable!(),
    };

    pub fn from_env() -> Self {
        Self {
            group_size: env::var("BATCH_GROUP_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_GROUP_SIZE),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            group_size: Self::DEFAULT_GROUP_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_group_size() {
        assert_eq!(BatchConfig::default().group_size.get(), 5);
    }

    #[test]
    fn test_zero_is_not_a_valid_group_size() {
        assert!("0".parse::<NonZeroUsize>().is_err());
    }
}
