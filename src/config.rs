use crate::discord;
use anyhow::{anyhow, Context as ErrContext, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use std::{fs, path::PathBuf};

#[derive(Parser, Clone, Debug)]
#[clap(version, about)]
pub struct Config {
    #[clap(long, env = "LEAVEVC_DISCORD_TOKEN", hide_env_values = true)]
    discord_token: Option<String>,
    /// File holding the bot token, used when no token is given directly
    #[clap(long, env = "LEAVEVC_DISCORD_TOKEN_FILE")]
    discord_token_file: Option<PathBuf>,
    /// Register commands only in this guild instead of globally
    #[clap(long, env = "LEAVEVC_DISCORD_GUILD")]
    discord_guild: Option<u64>,
    #[clap(long, env = "LEAVEVC_PREFIX", default_value = "~")]
    prefix: String,
    #[clap(long, env = "LEAVEVC_LOG_LEVEL", default_value = "warn")]
    log_level: LevelFilter,
}

impl Config {
    pub async fn discord(&self) -> Result<discord::Bot> {
        let token = self.discord_token()?;
        discord::create_client(&token, self.discord_guild, &self.prefix).await
    }

    pub fn discord_token(&self) -> Result<String> {
        if let Some(token) = &self.discord_token {
            return Ok(token.trim().to_owned());
        }
        let path = self
            .discord_token_file
            .as_ref()
            .ok_or_else(|| anyhow!("Either a discord token or a token file is required"))?;
        let token = fs::read_to_string(path)
            .with_context(|| format!("Could not read token file {}", path.display()))?;
        Ok(token.trim().to_owned())
    }

    pub fn logger(&self) -> SimpleLogger {
        SimpleLogger::new().with_level(self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("leavevc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["--discord-token", "abc"]);
        assert_eq!(config.prefix, "~");
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.discord_guild, None);
        assert_eq!(config.discord_token().unwrap(), "abc");
    }

    #[test]
    fn token_is_read_from_file() {
        let path = std::env::temp_dir().join(format!("leavevc-token-{}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "  secret-token  ").unwrap();

        let config = parse(&["--discord-token-file", path.to_str().unwrap()]);
        assert_eq!(config.discord_token().unwrap(), "secret-token");
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_token_is_an_error() {
        let config = parse(&["--log-level", "debug", "--discord-guild", "42"]);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.discord_guild, Some(42));
        assert!(config.discord_token().is_err());
    }
}
