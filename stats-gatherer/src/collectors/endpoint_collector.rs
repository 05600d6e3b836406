use crate::{
    collectors::Collector,
    context::{
        CollectionContext,
        CollectionKey,
        Fetched,
        Slot,
    },
    error::ContextError,
    fetcher::Fetcher,
};
use find_monitor_config::EndpointSet;
use futures::future::join_all;
use std::{
    future::Future,
    pin::Pin,
};
use url::Url;

/// Which endpoints a collector queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the first admin node; the answer is cluster-wide.
    FirstAdmin,
    /// Every admin node, to compare what each of them reports.
    EveryAdmin,
    /// Every proxy.
    EveryProxy,
}

/// Fetches `path` from the endpoints selected by `scope` and stores the answers under `key`.
#[derive(Debug, Clone)]
pub struct EndpointCollector {
    name: &'static str,
    key: CollectionKey,
    scope: Scope,
    path: &'static str,
}

impl EndpointCollector {
    pub const fn new(name: &'static str, key: CollectionKey, scope: Scope, path: &'static str) -> Self {
        Self { name, key, scope, path }
    }

    pub const fn cluster_health() -> Self {
        Self::new("cluster_health", CollectionKey::ClusterHealth, Scope::FirstAdmin, "/_cluster/health")
    }

    pub const fn cluster_stats() -> Self {
        Self::new("cluster_stats", CollectionKey::ClusterStats, Scope::FirstAdmin, "/_cluster/stats")
    }

    pub const fn nodes() -> Self {
        Self::new("nodes", CollectionKey::Nodes, Scope::EveryAdmin, "/_nodes")
    }

    pub const fn nodes_stats() -> Self {
        Self::new("nodes_stats", CollectionKey::NodesStats, Scope::EveryAdmin, "/_nodes/stats")
    }

    pub const fn indices_stats() -> Self {
        Self::new("indices_stats", CollectionKey::IndicesStats, Scope::FirstAdmin, "/_all/_stats")
    }

    pub const fn proxy_status() -> Self {
        Self::new("proxy_status", CollectionKey::ProxyStatus, Scope::EveryProxy, "/")
    }

    /// Joining an absolute path keeps scheme, host and port and replaces the path.
    fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(self.path)
    }

    async fn fetch_one(&self, fetcher: &Fetcher, base: &Url) -> Fetched {
        match self.url(base) {
            Ok(url) => fetcher.fetch(&url).await,
            Err(error) => {
                error!(collector = self.name, %base, path = self.path, %error, "Cannot build request URL");
                None
            }
        }
    }

    async fn fetch_all(&self, fetcher: &Fetcher, bases: &[Url]) -> Slot {
        let fetches = bases.iter().map(|base| self.fetch_one(fetcher, base));
        Slot::PerHost(join_all(fetches).await)
    }
}

impl Collector for EndpointCollector {
    fn collect<'a>(
        &'a self,
        fetcher: &'a Fetcher,
        endpoints: &'a EndpointSet,
        ctx: &'a mut CollectionContext,
    ) -> Pin<Box<dyn Future<Output = Result<(), ContextError>> + Send + 'a>> {
        Box::pin(async move {
            let slot = match self.scope {
                Scope::FirstAdmin => match endpoints.first_admin() {
                    Some(base) => Slot::Single(self.fetch_one(fetcher, base).await),
                    None => {
                        warn!(collector = self.name, "No admin endpoint configured");
                        Slot::Single(None)
                    }
                },
                Scope::EveryAdmin => self.fetch_all(fetcher, endpoints.admin_urls()).await,
                Scope::EveryProxy => self.fetch_all(fetcher, endpoints.proxy_urls()).await,
            };
            ctx.insert(self.key, slot)
        })
    }

    fn key(&self) -> CollectionKey {
        self.key
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// The collectors of one cycle, in the order they run.
pub fn default_collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(EndpointCollector::cluster_health()),
        Box::new(EndpointCollector::cluster_stats()),
        Box::new(EndpointCollector::nodes_stats()),
        Box::new(EndpointCollector::nodes()),
        Box::new(EndpointCollector::indices_stats()),
        Box::new(EndpointCollector::proxy_status()),
    ]
}
