//! Argument groups shared by several commands.

use clap::Args;
use transitmap::config::ConfigFile;
use transitmap::feed::FeedFormat;

use crate::error::CliError;

/// Feed overrides accepted by `run` and `fetch`.
#[derive(Debug, Clone, Default, Args)]
pub struct FeedArgs {
    /// Feed URL (overrides [feed] url)
    #[arg(long)]
    pub url: Option<String>,

    /// Payload format: auto, json or xml (overrides [feed] format)
    #[arg(long)]
    pub format: Option<FeedFormat>,
}

impl FeedArgs {
    /// Apply the overrides to a loaded config for this run only.
    pub fn apply(&self, config: &mut ConfigFile) -> Result<(), CliError> {
        if let Some(url) = &self.url {
            let url = url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::Config(format!(
                    "--url must start with http:// or https:// (got '{}')",
                    url
                )));
            }
            config.feed.url = url.to_string();
        }
        if let Some(format) = self.format {
            config.feed.format = format;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = ConfigFile::default();
        FeedArgs::default().apply(&mut config).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_overrides_replace_feed_settings() {
        let mut config = ConfigFile::default();
        let args = FeedArgs {
            url: Some("https://example.com/vm.json".to_string()),
            format: Some(FeedFormat::Json),
        };

        args.apply(&mut config).unwrap();

        assert_eq!(config.feed.url, "https://example.com/vm.json");
        assert_eq!(config.feed.format, FeedFormat::Json);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = ConfigFile::default();
        let args = FeedArgs {
            url: Some("ftp://example.com/feed".to_string()),
            format: None,
        };

        assert!(matches!(args.apply(&mut config), Err(CliError::Config(_))));
    }
}
