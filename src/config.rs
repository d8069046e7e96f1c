use std::env;
use std::fmt;

pub const DEFAULT_DATA_PATH: &str = "data/big5-combined-2022-23.csv";
pub const DEFAULT_TICK_MS: u64 = 250;
pub const DEFAULT_TOP_N: usize = 15;

/// Where the dataset comes from once the asset prefix is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(String),
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{path}"),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Join the static-asset prefix and the dataset path. An `http(s)://` result is fetched,
/// anything else is read from disk.
pub fn resolve_source(prefix: &str, path: &str) -> DataSource {
    let joined = if prefix.is_empty() {
        path.to_string()
    } else if prefix.ends_with('/') || path.starts_with('/') {
        format!("{}/{}", prefix.trim_end_matches('/'), path.trim_start_matches('/'))
    } else {
        format!("{prefix}/{path}")
    };
    if joined.starts_with("http://") || joined.starts_with("https://") {
        DataSource::Url(joined)
    } else {
        DataSource::File(joined)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub asset_prefix: String,
    pub data_path: String,
    pub tick_ms: u64,
    pub top_n: usize,
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_prefix: String::new(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            tick_ms: DEFAULT_TICK_MS,
            top_n: DEFAULT_TOP_N,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset; numbers that fail to
    /// parse fall back to their defaults before clamping.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());
        Self {
            asset_prefix: get("BIG5_ASSET_PREFIX")
                .map(|val| val.trim().to_string())
                .unwrap_or_default(),
            data_path: get("BIG5_DATA_PATH")
                .map(|val| val.trim().to_string())
                .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            tick_ms: get("BIG5_TICK_MS")
                .and_then(|val| val.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_TICK_MS)
                .clamp(50, 2000),
            top_n: get("BIG5_TOP_N")
                .and_then(|val| val.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_TOP_N)
                .clamp(5, 100),
            log_file: get("BIG5_LOG_FILE"),
        }
    }

    pub fn source(&self) -> DataSource {
        resolve_source(&self.asset_prefix, &self.data_path)
    }
}

/// Load `.env.local` then `.env`. Missing files are fine; earlier files win.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}
