use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Season segment that prefixes every pool page, e.g. "2022-2023".
    pub season: String,

    /// Path to the Chiba sale CSV rendered on /chiba. Missing file just
    /// leaves the page empty.
    pub chiba_csv_path: String,

    /// Optional deployment webhook pinged after a successful submission.
    pub deploy_hook_url: Option<String>,

    /// Bearer token for the organizer write route. Unset disables auth.
    pub admin_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            season: env::var("SEASON").unwrap_or_else(|_| "2022-2023".into()),
            chiba_csv_path: env::var("CHIBA_CSV_PATH")
                .unwrap_or_else(|_| "data/chiba-sale.csv".into()),
            deploy_hook_url: env::var("DEPLOY_HOOK_URL").ok(),
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }
}
