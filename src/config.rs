use serde::Deserialize;

/// Default request body limit for the JSON endpoints (1 MiB).
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub max_body_bytes: usize,
    /// Run the form validator on create as well (off unless `ENFORCE_LEAD_VALIDATION` is set).
    pub enforce_lead_validation: bool,
}

impl Config {
    /// Loads configuration from the process environment (and `.env`, if present).
    ///
    /// A missing or malformed database URL is an error; callers treat that as fatal.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            config.database_url.chars().take(20).collect::<String>()
        );
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("DB max connections: {}", config.db_max_connections);
        tracing::debug!("Server-side lead validation: {}", config.enforce_lead_validation);

        Ok(config)
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URL"))
            .or_else(|| lookup("MONGODB"))
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable required"))
            .and_then(|raw| {
                let url = raw.trim().to_string();
                if url.is_empty() {
                    anyhow::bail!("DATABASE_URL cannot be empty");
                }
                let parsed = url::Url::parse(&url)
                    .map_err(|e| anyhow::anyhow!("DATABASE_URL is not a valid URL: {}", e))?;
                if !matches!(parsed.scheme(), "postgres" | "postgresql") {
                    anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                }
                Ok(url)
            })?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive number"))?,
            None => 10,
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a number of bytes"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let enforce_lead_validation = match lookup("ENFORCE_LEAD_VALIDATION") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "" | "0" | "false" | "no" | "off" => false,
                _ => anyhow::bail!("ENFORCE_LEAD_VALIDATION must be true or false"),
            },
            None => false,
        };

        Ok(Self {
            database_url,
            port,
            db_max_connections,
            max_body_bytes,
            enforce_lead_validation,
        })
    }
}
