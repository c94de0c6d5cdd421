use std::sync::Arc;

use crate::evaluation::evaluator::Evaluator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
}
