// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::kubernetes::FilterCriteria;

#[derive(Parser, Debug)]
#[command(name = "kubectl-api_resource_versions")]
#[command(author, version)]
#[command(about = "List all API resources and their group versions")]
#[command(
    long_about = "List all API resources and their API group versions along with whether the \
                  version is preferred.\nSubresources are hidden unless --subresources is given."
)]
pub struct Args {
    /// Limit to resources in the specified API group
    #[arg(long, value_name = "GROUP")]
    pub api_group: Option<String>,

    /// If false, return non-namespaced resources, otherwise namespaced resources
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub namespaced: Option<bool>,

    /// Limit to resources that support all of the specified verbs
    #[arg(long, value_delimiter = ',', value_name = "VERBS")]
    pub verbs: Vec<String>,

    /// Limit to resources that belong to all of the specified categories
    #[arg(long, value_delimiter = ',', value_name = "CATEGORIES")]
    pub categories: Vec<String>,

    /// Filter resources by whether their group version is the preferred one
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub preferred: Option<bool>,

    /// Include subresources (e.g. pods/status)
    #[arg(long)]
    pub subresources: bool,

    /// Sort the list of resources using the specified field
    #[arg(long, value_enum, value_name = "FIELD")]
    pub sort_by: Option<SortBy>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Don't print headers (default and wide output only)
    #[arg(long)]
    pub no_headers: bool,

    /// Use the cached list of resources if available
    #[arg(long)]
    pub cached: bool,

    /// Kubernetes context to use (defaults to the current kubeconfig context)
    #[arg(long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Path to the kubeconfig file to use
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Assemble the resource selection criteria once, up front.
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            api_group: self.api_group.clone(),
            namespaced: self.namespaced,
            verbs: self.verbs.clone(),
            categories: self.categories.clone(),
            preferred: self.preferred,
            include_subresources: self.subresources,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Default columns plus verbs and categories
    Wide,
    /// One `name.version.group` per line, for piping into further commands
    Name,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    /// Sort by resource name
    Name,
    /// Sort by kind
    Kind,
}
