use crate::{
    context::{
        CollectionContext,
        CollectionKey,
    },
    error::ContextError,
    fetcher::Fetcher,
};
use find_monitor_config::EndpointSet;
use std::{
    future::Future,
    pin::Pin,
};

/// Fills one slot of the cycle's context.
///
/// Failed fetches are stored as failure markers; an error is only returned when the slot
/// itself cannot be written.
pub trait Collector: Send + Sync {
    fn collect<'a>(
        &'a self,
        fetcher: &'a Fetcher,
        endpoints: &'a EndpointSet,
        ctx: &'a mut CollectionContext,
    ) -> Pin<Box<dyn Future<Output = Result<(), ContextError>> + Send + 'a>>;

    /// The slot this collector writes.
    fn key(&self) -> CollectionKey;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
