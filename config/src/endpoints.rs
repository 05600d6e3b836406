use eyre::{
    Context as _,
    Result,
};
use url::Url;

/// Port of the cluster's administrative HTTP API on every node.
pub const ADMIN_PORT: u16 = 9200;
/// Port of the proxy running next to every node.
pub const PROXY_PORT: u16 = 8000;

/// Base URLs of the admin and proxy endpoints, in configured host order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    admin: Vec<Url>,
    proxy: Vec<Url>,
}

impl EndpointSet {
    pub fn new(admin: Vec<Url>, proxy: Vec<Url>) -> Self {
        Self { admin, proxy }
    }

    /// Derives one admin and one proxy URL per hostname.
    pub fn from_hosts<S: AsRef<str>>(hosts: &[S]) -> Result<Self> {
        let mut admin = Vec::with_capacity(hosts.len());
        let mut proxy = Vec::with_capacity(hosts.len());
        for host in hosts {
            let host = host.as_ref();
            admin.push(base_url(host, ADMIN_PORT)?);
            proxy.push(base_url(host, PROXY_PORT)?);
        }
        Ok(Self { admin, proxy })
    }

    pub fn admin_urls(&self) -> &[Url] {
        &self.admin
    }

    pub fn proxy_urls(&self) -> &[Url] {
        &self.proxy
    }

    /// The admin node that answers the cluster-wide queries.
    pub fn first_admin(&self) -> Option<&Url> {
        self.admin.first()
    }
}

fn base_url(host: &str, port: u16) -> Result<Url> {
    let url = Url::parse(&format!("http://{host}:{port}")).wrap_err_with(|| format!("Invalid cluster node {host:?}"))?;
    if url.host_str().is_none_or(str::is_empty) {
        eyre::bail!("Invalid cluster node {host:?}: no host");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_admin_and_proxy_url_per_host() {
        let endpoints = EndpointSet::from_hosts(&["es1", "es2.example.net"]).unwrap();
        let admin: Vec<_> = endpoints.admin_urls().iter().map(Url::as_str).collect();
        let proxy: Vec<_> = endpoints.proxy_urls().iter().map(Url::as_str).collect();
        assert_eq!(admin, ["http://es1:9200/", "http://es2.example.net:9200/"]);
        assert_eq!(proxy, ["http://es1:8000/", "http://es2.example.net:8000/"]);
        assert_eq!(endpoints.first_admin().unwrap().as_str(), "http://es1:9200/");
    }

    #[test]
    fn rejects_hosts_that_do_not_form_a_url() {
        assert!(EndpointSet::from_hosts(&["bad host"]).is_err());
        assert!(EndpointSet::from_hosts(&[""]).is_err());
    }
}
