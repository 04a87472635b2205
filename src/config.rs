// Application configuration, loaded from environment variables and CLI flags.

use crate::catalog::World;

/// Chat-platform credentials. Absent when the bot subsystem is disabled.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    /// Channel that holds the per-world board messages.
    pub channel_id: u64,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord: Option<DiscordConfig>,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Worlds to keep boards for.
    pub worlds: Vec<World>,
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `BOT_TOKEN` - Discord bot token; without it the bot does not start
    /// - `CHANNEL_ID` - numeric id of the board channel
    /// - `PORT` - HTTP listener port (default: 3000)
    /// - `WORLDS` - comma-separated world names to track (default: all)
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let port = Self::parse_cli_value(&args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(3000);

        let discord = match std::env::var("BOT_TOKEN").ok().filter(|t| !t.is_empty()) {
            Some(token) => match std::env::var("CHANNEL_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&id: &u64| id != 0)
            {
                Some(channel_id) => Some(DiscordConfig { token, channel_id }),
                None => {
                    tracing::error!("CHANNEL_ID missing or not numeric; bot disabled");
                    None
                }
            },
            None => None,
        };

        let worlds = Self::parse_worlds(std::env::var("WORLDS").ok().as_deref());

        Config {
            discord,
            port,
            worlds,
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }

    /// Resolve the `WORLDS` list against the catalog. Unknown names are
    /// logged and skipped; an empty result falls back to the full catalog.
    fn parse_worlds(raw: Option<&str>) -> Vec<World> {
        let Some(raw) = raw else {
            return World::ALL.to_vec();
        };

        let mut worlds = Vec::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match World::from_name(token) {
                Some(world) if !worlds.contains(&world) => worlds.push(world),
                Some(_) => {}
                None => tracing::warn!("unknown world '{token}' in WORLDS, skipping"),
            }
        }

        if worlds.is_empty() {
            tracing::warn!("WORLDS selected nothing, tracking the full catalog");
            return World::ALL.to_vec();
        }
        worlds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_value() {
        let args: Vec<String> = ["huntboard", "--port", "8080"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(Config::parse_cli_value(&args, "--port"), Some("8080".into()));
        assert_eq!(Config::parse_cli_value(&args, "--host"), None);
    }

    #[test]
    fn test_parse_worlds_default() {
        assert_eq!(Config::parse_worlds(None), World::ALL.to_vec());
    }

    #[test]
    fn test_parse_worlds_subset() {
        let worlds = Config::parse_worlds(Some("Halicarnassus, maduin"));
        assert_eq!(worlds, vec![World::Halicarnassus, World::Maduin]);
    }

    #[test]
    fn test_parse_worlds_skips_unknown_and_duplicates() {
        let worlds = Config::parse_worlds(Some("Golem,Ultros,golem"));
        assert_eq!(worlds, vec![World::Golem]);
    }

    #[test]
    fn test_parse_worlds_empty_falls_back() {
        assert_eq!(Config::parse_worlds(Some(" , ,")), World::ALL.to_vec());
        assert_eq!(Config::parse_worlds(Some("Ultros")), World::ALL.to_vec());
    }
}
