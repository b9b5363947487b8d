// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! Discovery access to the apiserver.
//!
//! Wraps the raw `kube` discovery endpoints behind a small trait so the
//! enumeration pipeline can run against a fake in tests.

use std::path::Path;

use anyhow::{Context, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIResourceList, GroupVersionForDiscovery,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, warn};

use super::cache::DiscoveryCache;
use super::discovery::parse_group_version;
use crate::error::Error;

/// Server-side discovery surface consumed by the enumeration pipeline.
///
/// Only consumed through generics, so returned futures need no auto-trait
/// bounds.
#[allow(async_fn_in_trait)]
pub trait DiscoveryClient {
    /// Every API group with its versions and group-preferred version.
    async fn list_groups(&self) -> Result<Vec<APIGroup>, Error>;

    /// Every resource kind registered under one specific group version.
    async fn list_resources(&self, group_version: &str) -> Result<APIResourceList, Error>;

    /// Per group, the resource list as served under the group's preferred
    /// version only.
    async fn list_preferred_resources(&self) -> Result<Vec<APIResourceList>, Error>;

    /// Discard any cached topology so subsequent calls hit the server.
    fn invalidate(&self);
}

/// Live discovery client backed by `kube::Client`, with an on-disk cache of
/// server responses consulted only when the caller opts in.
pub struct ApiDiscoveryClient {
    client: Client,
    cache: DiscoveryCache,
    use_cache: bool,
}

impl ApiDiscoveryClient {
    pub async fn new(
        context: Option<&str>,
        kubeconfig_path: Option<&Path>,
        use_cache: bool,
    ) -> Result<Self> {
        let kubeconfig = match kubeconfig_path {
            Some(path) => Kubeconfig::read_from(path)
                .with_context(|| format!("failed to read kubeconfig from {}", path.display()))?,
            None => Kubeconfig::read().context("failed to read kubeconfig")?,
        };

        let options = KubeConfigOptions {
            context: context.map(String::from),
            ..Default::default()
        };
        let config = Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .context("failed to load client configuration from kubeconfig")?;

        let cache = DiscoveryCache::for_cluster(&config.cluster_url.to_string())?;
        let client = Client::try_from(config).context("failed to create Kubernetes client")?;

        Ok(Self {
            client,
            cache,
            use_cache,
        })
    }

    async fn fetch_groups(&self) -> Result<Vec<APIGroup>, Error> {
        if self.use_cache {
            if let Some(groups) = self.cache.load_groups() {
                debug!("using cached server groups");
                return Ok(groups);
            }
        }

        let mut groups = Vec::new();
        if let Some(core) = self.fetch_core_group().await? {
            groups.push(core);
        }
        let group_list = self
            .client
            .list_api_groups()
            .await
            .map_err(|e| Error::ServerGroups(Box::new(e)))?;
        groups.extend(group_list.groups);

        debug!(count = groups.len(), "fetched server groups");
        self.cache.store_groups(&groups);

        Ok(groups)
    }

    /// The legacy core group is served from `/api` rather than `/apis` and
    /// carries no group record of its own, so synthesize one. Its first
    /// version is the server-preferred one.
    async fn fetch_core_group(&self) -> Result<Option<APIGroup>, Error> {
        let versions = self
            .client
            .list_core_api_versions()
            .await
            .map_err(|e| Error::ServerGroups(Box::new(e)))?;
        if versions.versions.is_empty() {
            return Ok(None);
        }

        let versions: Vec<GroupVersionForDiscovery> = versions
            .versions
            .into_iter()
            .map(|v| GroupVersionForDiscovery {
                group_version: v.clone(),
                version: v,
            })
            .collect();

        Ok(Some(APIGroup {
            name: String::new(),
            preferred_version: versions.first().cloned(),
            versions,
            ..Default::default()
        }))
    }
}

impl DiscoveryClient for ApiDiscoveryClient {
    async fn list_groups(&self) -> Result<Vec<APIGroup>, Error> {
        self.fetch_groups().await
    }

    async fn list_resources(&self, group_version: &str) -> Result<APIResourceList, Error> {
        let gv = parse_group_version(group_version)?;

        if self.use_cache {
            if let Some(list) = self.cache.load_resources(&gv) {
                debug!(group_version, "using cached server resources");
                return Ok(list);
            }
        }

        let result = if gv.group.is_empty() {
            self.client.list_core_api_resources(&gv.version).await
        } else {
            self.client.list_api_group_resources(group_version).await
        };
        let list = result.map_err(|e| Error::ServerResources {
            group_version: group_version.to_string(),
            source: Box::new(e),
        })?;

        self.cache.store_resources(&gv, &list);

        Ok(list)
    }

    async fn list_preferred_resources(&self) -> Result<Vec<APIResourceList>, Error> {
        let groups = self.fetch_groups().await?;

        let mut lists = Vec::new();
        for group in &groups {
            let Some(preferred) = group
                .preferred_version
                .as_ref()
                .or_else(|| group.versions.first())
            else {
                continue;
            };
            lists.push(self.list_resources(&preferred.group_version).await?);
        }

        Ok(lists)
    }

    fn invalidate(&self) {
        if let Err(e) = self.cache.clear() {
            warn!("failed to discard cached discovery data: {e:#}");
        }
    }
}
