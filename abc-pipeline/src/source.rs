use async_trait::async_trait;

use crate::util;

/// Sources produce the rows a view starts from.
#[async_trait]
pub trait Source<Q, R>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Decide if this source should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Fetch rows for the given query.
    async fn fetch(&self, query: &Q) -> Result<Vec<R>, String>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
