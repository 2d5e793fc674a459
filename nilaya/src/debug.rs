//! Observation hooks for intermediate clouds.
//!
//! When `perception.enable_debug` is set, the detection pass hands the staged
//! template, each staged target cluster and the winning aligned cloud to a
//! [`DebugSink`]. Nothing flows back into the algorithm.

use log::debug;

use crate::core::types::StampedCloud;

/// Which intermediate cloud is being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugChannel {
    /// Dock template staged at the initial estimate
    Template,
    /// Candidate cluster expressed in the staging frame
    Target,
    /// Aligned template of the selected dock
    Dock,
}

impl DebugChannel {
    /// Conventional topic name.
    pub fn topic(&self) -> &'static str {
        match self {
            DebugChannel::Template => "dock/template",
            DebugChannel::Target => "dock/target",
            DebugChannel::Dock => "dock/cloud",
        }
    }
}

/// Receiver of intermediate clouds.
pub trait DebugSink: Send + Sync {
    /// Publish one cloud.
    fn publish(&self, channel: DebugChannel, cloud: &StampedCloud);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DebugSink for NullSink {
    fn publish(&self, _channel: DebugChannel, _cloud: &StampedCloud) {}
}

/// Sink that logs a one-line summary per cloud.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn publish(&self, channel: DebugChannel, cloud: &StampedCloud) {
        let centroid = cloud.data.centroid().unwrap_or_default();
        debug!(
            "[{}] {} points in '{}' centred at ({:.3}, {:.3})",
            channel.topic(),
            cloud.data.len(),
            cloud.frame_id,
            centroid.x,
            centroid.y
        );
    }
}
