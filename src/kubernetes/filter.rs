// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! Resource selection predicates.

use super::discovery::VersionedResource;

/// Resource selection criteria, assembled once from the command line and
/// passed unchanged through the pipeline.
///
/// `Option` fields distinguish "not given" from "given the default value":
/// `--namespaced=true` must filter while an absent flag must not.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub api_group: Option<String>,
    pub namespaced: Option<bool>,
    pub verbs: Vec<String>,
    pub categories: Vec<String>,
    pub preferred: Option<bool>,
    pub include_subresources: bool,
}

impl FilterCriteria {
    /// True when an explicit group filter rules out the whole group.
    pub fn excludes_group(&self, group_name: &str) -> bool {
        self.api_group.as_deref().is_some_and(|g| g != group_name)
    }

    /// True when any criterion rules the resource out. The predicates are
    /// independent; their evaluation order carries no meaning.
    pub fn excludes_resource(&self, resource: &VersionedResource) -> bool {
        if resource.is_subresource() && !self.include_subresources {
            return true;
        }
        if self
            .namespaced
            .is_some_and(|namespaced| namespaced != resource.resource.namespaced)
        {
            return true;
        }
        if !self.verbs.is_empty() && !contains_all(&resource.resource.verbs, &self.verbs) {
            return true;
        }
        let categories = resource.resource.categories.as_deref().unwrap_or_default();
        if !self.categories.is_empty() && !contains_all(categories, &self.categories) {
            return true;
        }
        if self
            .preferred
            .is_some_and(|preferred| preferred != resource.preferred)
        {
            return true;
        }

        false
    }
}

fn contains_all(haystack: &[String], needles: &[String]) -> bool {
    needles.iter().all(|needle| haystack.contains(needle))
}
