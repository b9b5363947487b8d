// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

//! In-memory discovery client serving canned data for tests.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroup, APIResourceList};

use super::client::DiscoveryClient;
use crate::error::Error;
use crate::yamlutil;

const CORE_GROUP: &str = include_str!("testdata/core-group.yaml");
const CORE_RESOURCES: &str = include_str!("testdata/core-resources.yaml");
const AUTOSCALING_GROUP: &str = include_str!("testdata/autoscaling-group.yaml");
const AUTOSCALING_RESOURCES: &str = include_str!("testdata/autoscaling-resources.yaml");

/// Builder-style fake discovery client.
#[derive(Debug, Clone, Default)]
pub struct FakeDiscoveryClient {
    pub groups: Vec<APIGroup>,
    pub resources: Vec<APIResourceList>,
    pub preferred_resources: Vec<APIResourceList>,
}

impl FakeDiscoveryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(mut self, groups: Vec<APIGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_resources(mut self, resources: Vec<APIResourceList>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_preferred_resources(mut self, preferred: Vec<APIResourceList>) -> Self {
        self.preferred_resources = preferred;
        self
    }

    /// Fixture-backed client covering the core group (with subresources) and
    /// the autoscaling group (three served versions, v2 preferred).
    pub fn from_testdata() -> Self {
        let core_group = group_from_yaml(CORE_GROUP);
        let autoscaling_group = group_from_yaml(AUTOSCALING_GROUP);

        let mut resources = resources_from_yaml(CORE_RESOURCES);
        resources.extend(resources_from_yaml(AUTOSCALING_RESOURCES));

        let preferred = [&core_group, &autoscaling_group]
            .into_iter()
            .map(|group| {
                let gv = &group
                    .preferred_version
                    .as_ref()
                    .expect("fixture group has a preferred version")
                    .group_version;
                resources
                    .iter()
                    .find(|list| &list.group_version == gv)
                    .cloned()
                    .expect("fixture resources for preferred version")
            })
            .collect();

        Self {
            groups: vec![core_group, autoscaling_group],
            resources,
            preferred_resources: preferred,
        }
    }
}

impl DiscoveryClient for FakeDiscoveryClient {
    async fn list_groups(&self) -> Result<Vec<APIGroup>, Error> {
        Ok(self.groups.clone())
    }

    async fn list_resources(&self, group_version: &str) -> Result<APIResourceList, Error> {
        self.resources
            .iter()
            .find(|list| list.group_version == group_version)
            .cloned()
            .ok_or_else(|| Error::ServerResources {
                group_version: group_version.to_string(),
                source: "the server could not find the requested resource".into(),
            })
    }

    async fn list_preferred_resources(&self) -> Result<Vec<APIResourceList>, Error> {
        Ok(self.preferred_resources.clone())
    }

    fn invalidate(&self) {}
}

fn group_from_yaml(raw: &str) -> APIGroup {
    let value = yamlutil::yaml_documents_to_json(raw)
        .next()
        .expect("fixture contains a document")
        .expect("fixture is valid YAML");
    serde_json::from_value(value).expect("fixture decodes into APIGroup")
}

fn resources_from_yaml(raw: &str) -> Vec<APIResourceList> {
    yamlutil::yaml_documents_to_json(raw)
        .map(|doc| {
            serde_json::from_value(doc.expect("fixture is valid YAML"))
                .expect("fixture decodes into APIResourceList")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testdata_shape() {
        let fake = FakeDiscoveryClient::from_testdata();

        assert_eq!(fake.groups.len(), 2);
        assert_eq!(fake.groups[0].name, "");
        assert_eq!(fake.groups[1].name, "autoscaling");

        // One core list, three autoscaling lists.
        assert_eq!(fake.resources.len(), 4);

        // Preferred summary: core v1 and autoscaling v2.
        let preferred: Vec<&str> = fake
            .preferred_resources
            .iter()
            .map(|list| list.group_version.as_str())
            .collect();
        assert_eq!(preferred, vec!["v1", "autoscaling/v2"]);
    }

    #[tokio::test]
    async fn unknown_group_version_is_an_error() {
        let fake = FakeDiscoveryClient::from_testdata();
        let result = fake.list_resources("apps/v9").await;
        assert!(matches!(
            result,
            Err(Error::ServerResources { group_version, .. }) if group_version == "apps/v9"
        ));
    }
}
