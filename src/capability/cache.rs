use std::sync::{
    OnceLock,
    atomic::{AtomicUsize, Ordering},
};

use tracing::info;

use crate::capability::provider::CapabilityProvider;

/// Single-assignment cache of the SVG backdrop-filter capability.
///
/// The first [`CapabilityCache::get_or_detect`] runs the provider; every later call, from any
/// controller sharing the cache, returns the stored value without detecting again. Use
/// [`CapabilityCache::global`] for the process-wide instance or create a local one to isolate
/// tests.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    value: OnceLock<bool>,
    detections: AtomicUsize,
}

static GLOBAL: CapabilityCache = CapabilityCache::new();

impl CapabilityCache {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            detections: AtomicUsize::new(0),
        }
    }

    pub fn global() -> &'static CapabilityCache {
        &GLOBAL
    }

    pub fn get_or_detect(&self, provider: &dyn CapabilityProvider) -> bool {
        *self.value.get_or_init(|| {
            self.detections.fetch_add(1, Ordering::Relaxed);
            let supported = provider.detect();
            info!(supported, "resolved svg backdrop-filter capability");
            supported
        })
    }

    /// Resolved value, if detection already ran.
    pub fn get(&self) -> Option<bool> {
        self.value.get().copied()
    }

    /// How many times a provider was consulted (0 or 1).
    pub fn detection_count(&self) -> usize {
        self.detections.load(Ordering::Relaxed)
    }
}
