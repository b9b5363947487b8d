mod cache;
mod client;
pub mod discovery;
mod filter;
mod sort;

#[cfg(test)]
pub mod fake;

pub use client::{ApiDiscoveryClient, DiscoveryClient};
pub use discovery::{gather_resources, VersionedResource};
pub use filter::FilterCriteria;
pub use sort::sort_resources;
