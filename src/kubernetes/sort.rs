// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! Ordering of the filtered resource list.

use crate::cli::SortBy;

use super::discovery::VersionedResource;

/// Sort `resources` by the requested key, or by group then resource name
/// when no key was given.
///
/// The sort is stable: records comparing equal (the same resource under
/// several versions, for instance) keep their discovery order, so output is
/// reproducible run to run.
pub fn sort_resources(resources: &mut [VersionedResource], sort_by: Option<SortBy>) {
    match sort_by {
        Some(SortBy::Name) => resources.sort_by(|a, b| a.resource.name.cmp(&b.resource.name)),
        Some(SortBy::Kind) => resources.sort_by(|a, b| a.resource.kind.cmp(&b.resource.kind)),
        None => resources.sort_by(|a, b| {
            a.group
                .cmp(&b.group)
                .then_with(|| a.resource.name.cmp(&b.resource.name))
        }),
    }
}
