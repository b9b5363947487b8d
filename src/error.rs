//! Error types surfaced by the discovery and printing pipeline.

use kube::core::gvk::ParseGroupVersionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Listing the API groups from the apiserver failed.
    #[error("couldn't get server groups: {0}")]
    ServerGroups(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Listing the resources of one group version failed. The whole
    /// enumeration aborts; a partial listing would be silently misleading.
    #[error("couldn't get server resources for group version {group_version}: {source}")]
    ServerResources {
        group_version: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server handed back a group version string that does not split
    /// into group and version.
    #[error(transparent)]
    GroupVersionParse(#[from] ParseGroupVersionError),

    /// Nothing survived filtering and the output format expects a table.
    #[error("no resources found")]
    NoResourcesFound,

    /// One or more rows could not be written to the output sink.
    #[error("error printing resources: {}", join_errors(.0))]
    Print(Vec<std::io::Error>),

    /// The output sink could not be flushed; output may be undelivered.
    #[error("error flushing output: {0}")]
    Flush(#[source] std::io::Error),
}

fn join_errors(errors: &[std::io::Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
