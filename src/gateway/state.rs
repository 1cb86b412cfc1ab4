use std::sync::Arc;

use crate::completion::CompletionService;
use crate::embedding::Embedder;
use crate::index::FactIndex;
use crate::pipeline::FactChecker;

/// Shared state handed to every request handler.
pub struct AppState<E, C> {
    pub checker: Arc<FactChecker<E, C>>,
}

impl<E, C> Clone for AppState<E, C> {
    fn clone(&self) -> Self {
        Self {
            checker: Arc::clone(&self.checker),
        }
    }
}

impl<E, C> AppState<E, C>
where
    E: Embedder + 'static,
    C: CompletionService + 'static,
{
    pub fn new(checker: Arc<FactChecker<E, C>>) -> Self {
        Self { checker }
    }

    pub fn index(&self) -> &FactIndex {
        self.checker.retriever().index()
    }

    pub fn embedder_is_stub(&self) -> bool {
        self.checker.retriever().embedder().is_stub()
    }
}
