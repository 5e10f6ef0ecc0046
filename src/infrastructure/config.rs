use chrono::FixedOffset;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    pub bulk: BulkSettings,
    pub live: LiveSettings,
    #[serde(default)]
    pub reporting: ReportingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BulkSettings {
    pub host: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LiveSettings {
    pub host: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportingSettings {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl ReportingSettings {
    /// The timezone live timestamps are reported in and snapshots are cut at.
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!("utc_offset_hours {} is out of range", self.utc_offset_hours)
            })
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limit() -> u32 {
    100
}

fn default_utc_offset_hours() -> i32 {
    9
}

/// Load from `config/sources.*` (optional), overridden by `GRAPHS__*` env vars,
/// e.g. `GRAPHS__LIVE__HOST`.
pub fn load_sources_config() -> anyhow::Result<SourcesConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/sources").required(false))
        .add_source(config::Environment::with_prefix("GRAPHS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
