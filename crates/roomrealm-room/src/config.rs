//! Configuration for the room layer components.

use std::time::Duration;

/// Configuration for the [`MessageChannel`](crate::MessageChannel).
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// How many received messages the inbound buffer retains. The oldest
    /// is dropped when the cap is exceeded; the most recent is always
    /// available as "last message".
    ///
    /// Default: 64. Must be at least 1.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Configuration for the [`PresenceTracker`](crate::PresenceTracker).
#[derive(Debug, Clone, Default)]
pub struct PresenceConfig {
    /// Optional snapshot lifetime. While a snapshot for the current room
    /// is younger than this, `list()` serves it without a network call.
    ///
    /// Default: `None` — every `list()` issues a fresh request, matching
    /// the service's observed behavior. A short TTL (sub-second) trades a
    /// little staleness for resilience against polling loops.
    pub cache_ttl: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_config_default_capacity() {
        assert_eq!(ChannelConfig::default().capacity, 64);
    }

    #[test]
    fn test_presence_config_defaults_to_no_cache() {
        assert!(PresenceConfig::default().cache_ttl.is_none());
    }
}
