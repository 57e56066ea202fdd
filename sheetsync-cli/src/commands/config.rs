//! Config command - inspect and edit the property scopes.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde_json::json;
use tracing::warn;

use sheetsync_store::properties::{set_property, PropertyScope};
use sheetsync_store::RECOGNIZED_KEYS;

use crate::Cli;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Config subcommand.
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration (API key redacted).
    Show,
    /// Write one property into a scope.
    Set {
        /// Property key, e.g. API_URL or ENDPOINTS.
        key: String,
        /// Property value.
        value: String,
        /// Scope to write into.
        #[arg(long, value_enum, default_value_t = ScopeArg::User)]
        scope: ScopeArg,
    },
    /// Print the property scope paths.
    Path,
}

/// Scope selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Installation-level scope.
    Script,
    /// Per-user scope (wins on identical keys).
    User,
}

impl From<ScopeArg> for PropertyScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Script => PropertyScope::Script,
            ScopeArg::User => PropertyScope::User,
        }
    }
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let config = cli.resolver().resolve().await?;
            let mut value = serde_json::to_value(&config)?;
            if let Some(key) = value.pointer_mut("/api/api_key") {
                if key.as_str().is_some_and(|s| !s.is_empty()) {
                    *key = json!("<redacted>");
                }
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ConfigCommands::Set { key, value, scope } => {
            if !RECOGNIZED_KEYS.contains(&key.as_str()) {
                warn!(key = %key, "Key is not recognized by the resolver and will be ignored");
            }
            let path = cli.scope_path((*scope).into());
            set_property(&path, key, value).await?;
            if !cli.quiet {
                println!("Set {key} in {} scope ({})", PropertyScope::from(*scope), path.display());
            }
        }
        ConfigCommands::Path => {
            println!("script: {}", cli.scope_path(PropertyScope::Script).display());
            println!("user:   {}", cli.scope_path(PropertyScope::User).display());
        }
    }
    Ok(())
}
