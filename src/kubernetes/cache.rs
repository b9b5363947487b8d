// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! Local cache for apiserver discovery responses.
//!
//! Stores the group list and per-group-version resource lists as JSON files,
//! one directory per cluster, in the layout client-go's cached discovery
//! client uses: `servergroups.json` plus `<group>/<version>/serverresources.json`.
//! Entries older than the TTL are treated as absent. Cache failures degrade
//! to a live fetch; they are never fatal.
//!
//! Cache location: ~/.kubectl-api-resource-versions/cache/discovery/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroup, APIResourceList};
use kube::core::GroupVersion;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// How long cached discovery responses stay valid.
const DISCOVERY_TTL: Duration = Duration::from_secs(6 * 60 * 60);

const GROUPS_FILE: &str = "servergroups.json";
const RESOURCES_FILE: &str = "serverresources.json";

/// Atomically write content to a file using tempfile + rename
///
/// Creates a temporary file in the same directory, writes content, then
/// atomically renames it to the final path. Other processes see either the
/// old or the new content, never a partial write.
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use tempfile::NamedTempFile;

    let temp_file =
        NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
            .context("Failed to create temp file")?;

    fs::write(temp_file.path(), content)
        .with_context(|| format!("Failed to write temp file {:?}", temp_file.path()))?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file to {:?}", path))?;

    Ok(())
}

pub struct DiscoveryCache {
    dir: PathBuf,
}

impl DiscoveryCache {
    /// Cache rooted at the per-cluster directory for `cluster_url`.
    pub fn for_cluster(cluster_url: &str) -> Result<Self> {
        let base = home::home_dir().context("could not determine home directory")?;
        let dir = base
            .join(".kubectl-api-resource-versions")
            .join("cache")
            .join("discovery")
            .join(sanitize_host(cluster_url));
        Ok(Self::at(dir))
    }

    fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn groups_path(&self) -> PathBuf {
        self.dir.join(GROUPS_FILE)
    }

    fn resources_path(&self, gv: &GroupVersion) -> PathBuf {
        // The core group's empty name collapses to a bare version directory.
        if gv.group.is_empty() {
            self.dir.join(&gv.version).join(RESOURCES_FILE)
        } else {
            self.dir.join(&gv.group).join(&gv.version).join(RESOURCES_FILE)
        }
    }

    pub fn load_groups(&self) -> Option<Vec<APIGroup>> {
        load_fresh(&self.groups_path())
    }

    pub fn store_groups(&self, groups: &[APIGroup]) {
        store(&self.groups_path(), &groups);
    }

    pub fn load_resources(&self, gv: &GroupVersion) -> Option<APIResourceList> {
        load_fresh(&self.resources_path(gv))
    }

    pub fn store_resources(&self, gv: &GroupVersion, list: &APIResourceList) {
        store(&self.resources_path(gv), list);
    }

    /// Remove every cached response for this cluster.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .with_context(|| format!("failed to remove cache directory {:?}", self.dir))?;
        }
        Ok(())
    }
}

fn load_fresh<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let age = SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO);
    if age > DISCOVERY_TTL {
        debug!(path = %path.display(), "cached discovery data expired");
        return None;
    }

    let content = fs::read(path).ok()?;
    serde_json::from_slice(&content).ok()
}

fn store<T: Serialize>(path: &Path, value: &T) {
    let result = serde_json::to_vec(value)
        .map_err(anyhow::Error::from)
        .and_then(|content| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            atomic_write(path, &content)
        });
    if let Err(e) = result {
        debug!(path = %path.display(), "failed to write discovery cache: {e:#}");
    }
}

/// Turn a cluster URL into a directory name.
fn sanitize_host(cluster_url: &str) -> String {
    cluster_url
        .trim_end_matches('/')
        .replace(|c: char| !c.is_ascii_alphanumeric() && c != '.' && c != '-', "_")
}
