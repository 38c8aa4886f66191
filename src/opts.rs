//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::auth::AccessToken;

pub mod parsers;

#[derive(Parser)]
#[clap(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[clap(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry, from 0 to 1
    #[clap(
        long,
        env = "TRACES_SAMPLE_RATE",
        default_value = "0",
        value_parser = parsers::sample_rate,
    )]
    pub traces_sample_rate: f32,

    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Web(WebOpts),
}

/// Runs the web application
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[clap(long, default_value = "::")]
    pub host: String,

    /// Web application bind port
    #[clap(short, long, default_value = "8081", env = "PORT")]
    pub port: u16,

    /// Directory containing the CSV exports
    #[clap(long, default_value = ".", env = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Access token accepted by the authentication gate, as `name=token` or a bare token
    #[clap(
        long = "access-token",
        env = "ACCESS_TOKENS",
        value_delimiter = ',',
        hide_env_values = true,
        value_parser = parsers::access_token,
    )]
    pub access_tokens: Vec<AccessToken>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::prelude::*;

    #[test]
    fn verify_command_ok() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parse_web_ok() -> Result {
        let opts = Opts::try_parse_from([
            "agency-dashboard",
            "web",
            "--data-dir",
            "/srv/exports",
            "--access-token",
            "alice=secret,plain-token",
        ])?;
        let Subcommand::Web(opts) = opts.subcommand;
        assert_eq!(opts.data_dir, PathBuf::from("/srv/exports"));
        assert_eq!(opts.access_tokens.len(), 2);
        assert_eq!(opts.access_tokens[0].name(), "alice");
        assert_eq!(opts.access_tokens[1].name(), "plain-token");
        Ok(())
    }
}
