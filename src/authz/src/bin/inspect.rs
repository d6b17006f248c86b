//! # Policy Inspection Tool
//!
//! Evaluates the club policy table for one role, for auditing a policy file
//! before it is deployed.
//!
//! ## Usage
//!
//! - `authz-inspect <role>` - print the role's permission snapshot as JSON
//! - `authz-inspect <role> <action>...` - print `action: allow|deny` per action
//! - `authz-inspect --thresholds <role>` - list every capability with its
//!   minimum role and the decision for `<role>`
//!
//! ## Configuration
//!
//! Environment variables:
//! - `CLUB_AUTHZ_POLICY` - JSON policy table (default: built-in club table)
//! - `RUST_LOG` - Log level (default: info)

use anyhow::Context;
use clap::Parser;
use clubhouse_authz::{AuthorizationService, AuthorizerRegistry, AuthzConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Clubhouse policy inspector
#[derive(Debug, Parser)]
#[command(name = "authz-inspect")]
#[command(about = "Evaluate the club authorization policy for one role")]
#[command(version)]
struct Cli {
    /// Role to evaluate (e.g. "secretary")
    role: String,

    /// Dotted actions to check; prints the full snapshot when omitted
    actions: Vec<String>,

    /// JSON policy table (default: built-in club table)
    #[arg(long, env = "CLUB_AUTHZ_POLICY")]
    policy: Option<PathBuf>,

    /// List every capability with its minimum role
    #[arg(long, conflicts_with = "actions")]
    thresholds: bool,
}

impl Cli {
    fn config(&self) -> AuthzConfig {
        match &self.policy {
            Some(path) if !path.as_os_str().is_empty() => {
                AuthzConfig::default().with_policy_path(path)
            }
            _ => AuthzConfig::default(),
        }
    }
}

fn main() -> ExitCode {
    // Usage errors exit with code 2 from clap
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("Clubhouse authz inspector v{}", clubhouse_authz::VERSION);

    let registry = AuthorizerRegistry::from_config(&cli.config())
        .context("failed to build policy registry")?;

    if !registry.hierarchy().rank_of(&cli.role).is_valid() {
        warn!(role = %cli.role, "Role is not declared; every action will be denied");
    }

    let service = AuthorizationService::new(cli.role.as_str(), &registry);

    if cli.thresholds {
        for (action, min_rank) in registry.capabilities() {
            let min_role = registry.hierarchy().name_of(min_rank).unwrap_or("?");
            let decision = if service.is_authorized(&action) { "allow" } else { "deny" };
            println!("{action}: {min_role} ({decision})");
        }
        return Ok(());
    }

    if cli.actions.is_empty() {
        let snapshot = service.get_permissions();
        let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        println!("{json}");
        return Ok(());
    }

    for action in &cli.actions {
        let decision = if service.is_authorized(action) { "allow" } else { "deny" };
        println!("{action}: {decision}");
    }

    Ok(())
}
