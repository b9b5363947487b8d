// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! Enumeration of API resources across every group version they are served
//! under.
//!
//! Discovery reports each resource once per group version. The server's
//! preferred-resources summary names the single version it considers
//! canonical for each base resource; joining the two tells us whether a given
//! record is the preferred one.

use std::collections::HashMap;
use std::str::FromStr;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use kube::core::gvk::ParseGroupVersionError;
use kube::core::GroupVersion;
use tracing::debug;

use super::client::DiscoveryClient;
use super::filter::FilterCriteria;
use crate::error::Error;

/// A resource name as served by discovery, with any subresource suffix
/// split off at the first `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    base: String,
    subresource: Option<String>,
}

impl ResourceName {
    pub fn parse(name: &str) -> Self {
        match name.split_once('/') {
            Some((base, subresource)) => Self {
                base: base.to_string(),
                subresource: Some(subresource.to_string()),
            },
            None => Self {
                base: name.to_string(),
                subresource: None,
            },
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn subresource(&self) -> Option<&str> {
        self.subresource.as_deref()
    }

    pub fn is_subresource(&self) -> bool {
        self.subresource.is_some()
    }

    /// Unversioned resource identity, `base.group`. Preference is defined per
    /// base resource, so subresources share their parent's identity.
    pub fn with_group(&self, group: &str) -> String {
        format!("{}.{}", self.base, group)
    }
}

/// One API resource as discovered under one specific group version.
#[derive(Debug, Clone)]
pub struct VersionedResource {
    /// Owning API group name; empty for the core group.
    pub group: String,
    /// The group version this record was discovered under.
    pub group_version: GroupVersion,
    /// The raw discovery descriptor.
    pub resource: APIResource,
    /// Resource name with any subresource suffix split off.
    pub name: ResourceName,
    /// Whether this record's version is the server-preferred one for the
    /// base resource.
    pub preferred: bool,
}

impl VersionedResource {
    pub fn is_subresource(&self) -> bool {
        self.name.is_subresource()
    }

    /// The `group/version` (or bare `version`) string for display.
    pub fn api_version(&self) -> String {
        self.group_version.api_version()
    }

    /// Fully qualified name in the form further kubectl commands accept:
    /// `name.version.group`, with the subresource appended after a space.
    /// The core group renders as a trailing empty segment (`pods.v1.`).
    pub fn full_name(&self) -> String {
        let base = format!(
            "{}.{}.{}",
            self.name.base(),
            self.group_version.version,
            self.group
        );
        match self.name.subresource() {
            Some(subresource) => format!("{base} {subresource}"),
            None => base,
        }
    }
}

/// Mapping from unversioned resource identity (`base.group`) to the version
/// the server serves it under in the preferred-resources summary.
pub type PreferredVersions = HashMap<String, String>;

/// Parse a `group/version` (or bare `version`) string, rejecting anything
/// with leftover separators. `GroupVersion::from_str` splits on the first
/// `/` only, so `apps/v1/oops` would otherwise slip through as version
/// `v1/oops`.
pub(super) fn parse_group_version(gv: &str) -> Result<GroupVersion, Error> {
    let parsed = GroupVersion::from_str(gv)?;
    if parsed.version.contains('/') {
        return Err(Error::GroupVersionParse(ParseGroupVersionError(
            gv.to_string(),
        )));
    }
    Ok(parsed)
}

/// Build the preferred-version lookup from the server's summary.
///
/// Subresources are skipped; preference is computed before subresource
/// filtering, per base resource. Later entries overwrite earlier ones, which
/// is safe because each base resource appears in exactly one preferred group
/// version. A malformed group version aborts the build; a partial index
/// would silently misclassify resources downstream.
pub fn preferred_resource_versions(
    preferred: &[APIResourceList],
) -> Result<PreferredVersions, Error> {
    let mut versions = PreferredVersions::new();
    for list in preferred {
        let gv = parse_group_version(&list.group_version)?;
        for resource in &list.resources {
            let name = ResourceName::parse(&resource.name);
            if name.is_subresource() {
                continue;
            }
            versions.insert(name.with_group(&gv.group), gv.version.clone());
        }
    }
    Ok(versions)
}

/// Walk every group, every group version, and every resource, producing the
/// records that pass `criteria`, in discovery order.
///
/// Any per-group-version fetch failure aborts the whole enumeration; no
/// partial results are returned.
pub async fn gather_resources<D: DiscoveryClient>(
    client: &D,
    criteria: &FilterCriteria,
) -> Result<Vec<VersionedResource>, Error> {
    let preferred = preferred_resource_versions(&client.list_preferred_resources().await?)?;
    let groups = client.list_groups().await?;

    let mut resources = Vec::new();
    for group in &groups {
        if criteria.excludes_group(&group.name) {
            continue;
        }

        for version in &group.versions {
            let list = client.list_resources(&version.group_version).await?;

            for descriptor in &list.resources {
                let name = ResourceName::parse(&descriptor.name);
                let is_preferred = preferred
                    .get(&name.with_group(&group.name))
                    .is_some_and(|v| *v == version.version);

                let resource = VersionedResource {
                    group: group.name.clone(),
                    group_version: GroupVersion::gv(&group.name, &version.version),
                    resource: descriptor.clone(),
                    name,
                    preferred: is_preferred,
                };

                if !criteria.excludes_resource(&resource) {
                    resources.push(resource);
                }
            }
        }
    }

    debug!(count = resources.len(), "discovered resources");

    Ok(resources)
}
