// Copyright (c) 2025 kubectl-api-resource-versions contributors
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod error;
mod kubernetes;
mod output;
#[cfg(test)]
mod yamlutil;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Args, OutputFormat};
use error::Error;
use kubernetes::{ApiDiscoveryClient, DiscoveryClient};

/// Initialize logging to stderr, leaving stdout to the resource listing.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "kubectl_api_resource_versions=debug"
    } else {
        "kubectl_api_resource_versions=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (aws-lc-rs)
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let client = ApiDiscoveryClient::new(
        args.context.as_deref(),
        args.kubeconfig.as_deref(),
        args.cached,
    )
    .await
    .context("couldn't create discovery client")?;

    if !args.cached {
        client.invalidate();
    }

    let criteria = args.filter_criteria();
    let mut resources = kubernetes::gather_resources(&client, &criteria).await?;

    if resources.is_empty() && args.output != Some(OutputFormat::Name) {
        return Err(Error::NoResourcesFound.into());
    }

    kubernetes::sort_resources(&mut resources, args.sort_by);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::print_resources(&mut out, &resources, args.output, args.no_headers)?;

    Ok(())
}
