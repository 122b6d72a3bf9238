pub mod lookup;

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::{API_BASE_URL, SUBJECT_DELAY};

#[derive(Parser, Debug)]
#[command(
    name = "breach-finder",
    version,
    about = "Find breach and paste information about email accounts on Have I Been Pwned"
)]
#[command(group(ArgGroup::new("subjects").required(true).args(["user_list", "user"])))]
pub struct Cli {
    /// File with one email address per line
    #[arg(short = 'u', long = "user_list")]
    pub user_list: Option<PathBuf>,

    /// Single email address to check
    #[arg(short = 'U', long = "user")]
    pub user: Option<String>,

    /// Folder to store findings (defaults to ./hipd)
    #[arg(short, long)]
    pub outfolder: Option<PathBuf>,

    /// Have I Been Pwned API key
    #[arg(short, long, env = "HIBP_API_KEY", hide_env_values = true)]
    pub token: Option<String>,

    /// Give up on a lookup after this many rate-limited retries (default: never)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Pause before each account, in milliseconds
    #[arg(long, default_value_t = SUBJECT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    #[arg(long, env = "HIBP_API_URL", default_value = API_BASE_URL, hide = true)]
    pub api_url: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_user() {
        let cli = Cli::try_parse_from(["breach-finder", "-U", "a@x.com", "-t", "key"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("a@x.com"));
        assert_eq!(cli.token.as_deref(), Some("key"));
        assert!(cli.user_list.is_none());
        assert_eq!(cli.delay_ms, 1600);
        assert!(cli.max_retries.is_none());
    }

    #[test]
    fn test_user_list_long_flags() {
        let cli = Cli::try_parse_from([
            "breach-finder",
            "--user_list",
            "users.txt",
            "--outfolder",
            "out",
            "--max-retries",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.user_list, Some(PathBuf::from("users.txt")));
        assert_eq!(cli.outfolder, Some(PathBuf::from("out")));
        assert_eq!(cli.max_retries, Some(4));
    }

    #[test]
    fn test_user_and_list_are_exclusive() {
        let err = Cli::try_parse_from(["breach-finder", "-u", "users.txt", "-U", "a@x.com"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_one_subject_source_required() {
        let err = Cli::try_parse_from(["breach-finder", "-o", "out"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
