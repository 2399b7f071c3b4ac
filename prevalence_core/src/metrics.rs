use std::time::Duration;

use serde::Serialize;

use crate::dashboard::ViewKind;

/// Counters describing how much recompute work interactions caused.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RecomputeMetrics {
    pub interactions: u64,
    pub view_recomputes: [u64; ViewKind::COUNT],
    pub last_views: usize,
    pub last_elapsed_us: u64,
}

impl RecomputeMetrics {
    pub fn record(&mut self, views: &[ViewKind], elapsed: Duration) {
        self.interactions += 1;
        for view in views {
            self.view_recomputes[view.index()] += 1;
        }
        self.last_views = views.len();
        self.last_elapsed_us = elapsed.as_micros().min(u64::MAX as u128) as u64;
    }

    pub fn recomputes_of(&self, view: ViewKind) -> u64 {
        self.view_recomputes[view.index()]
    }

    pub fn total_recomputes(&self) -> u64 {
        self.view_recomputes.iter().sum()
    }
}
