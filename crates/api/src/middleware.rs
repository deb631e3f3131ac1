use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Process-wide counter of page-serving requests.
///
/// Cloneable handle over a shared atomic; increments are a single atomic add
/// so concurrent requests never lose updates.
#[derive(Debug, Clone, Default)]
pub struct HitCounter {
    hits: Arc<AtomicU64>,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.hits.swap(0, Ordering::Relaxed);
    }
}

/// Count the request, then delegate to the wrapped service.
///
/// The count happens before the inner service runs and is independent of its
/// outcome; a 404 from the file server still counts as a hit.
pub async fn track_hits(
    State(counter): State<HitCounter>,
    req: Request,
    next: Next,
) -> Response {
    counter.increment();
    next.run(req).await
}
