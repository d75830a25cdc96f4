use std::sync::Arc;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum
/// extractors. Immutable after startup — requests share nothing mutable,
/// so concurrent calls need no coordination.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `GeminiClient`. Tests: stubs.
    pub llm: Arc<dyn TextGenerator>,
}
