use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::ChartData;

use super::ChartLayout;

/// Runtime metrics exposed by the derived-value cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivedCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct LayoutCacheKey {
    pub(super) data_generation: u64,
    pub(super) layout_generation: u64,
}

/// Memoizes derived chart data and layout per input generation.
///
/// Every input setter bumps a generation counter, so entries are never stale
/// and no explicit invalidation is needed beyond `clear`.
#[derive(Debug, Default)]
pub(super) struct DerivedCache {
    data: Option<(u64, Arc<ChartData>)>,
    layout: Option<(LayoutCacheKey, Option<Arc<ChartLayout>>)>,
    hits: u64,
    misses: u64,
}

impl DerivedCache {
    pub(super) fn data_or_insert_with(
        &mut self,
        generation: u64,
        derive: impl FnOnce() -> ChartData,
    ) -> Arc<ChartData> {
        if let Some((cached_generation, data)) = &self.data {
            if *cached_generation == generation {
                self.hits = self.hits.saturating_add(1);
                trace!(generation, "chart data cache hit");
                return Arc::clone(data);
            }
        }

        self.misses = self.misses.saturating_add(1);
        debug!(generation, "chart data cache miss");
        let data = Arc::new(derive());
        self.data = Some((generation, Arc::clone(&data)));
        data
    }

    pub(super) fn cached_layout(&mut self, key: LayoutCacheKey) -> Option<Option<Arc<ChartLayout>>> {
        match &self.layout {
            Some((cached_key, layout)) if *cached_key == key => {
                self.hits = self.hits.saturating_add(1);
                trace!(
                    data_generation = key.data_generation,
                    layout_generation = key.layout_generation,
                    "chart layout cache hit"
                );
                Some(layout.clone())
            }
            _ => None,
        }
    }

    pub(super) fn store_layout(&mut self, key: LayoutCacheKey, layout: Option<Arc<ChartLayout>>) {
        self.misses = self.misses.saturating_add(1);
        debug!(
            data_generation = key.data_generation,
            layout_generation = key.layout_generation,
            has_layout = layout.is_some(),
            "chart layout cache miss"
        );
        self.layout = Some((key, layout));
    }

    pub(super) fn stats(&self) -> DerivedCacheStats {
        DerivedCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub(super) fn clear(&mut self) {
        self.data = None;
        self.layout = None;
        self.hits = 0;
        self.misses = 0;
    }
}
