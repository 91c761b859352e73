use std::path::PathBuf;

/// Gateway configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables. The interpreter and
/// script paths are deployment-time configuration by design: the
/// run-script endpoint never accepts paths from the caller.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `330`).
    /// Must exceed the script timeout or long script runs are cut off at
    /// the HTTP layer first.
    pub request_timeout_secs: u64,
    /// Directory under which finalized recordings are stored.
    pub recordings_dir: PathBuf,
    /// Directory for in-progress upload staging files.
    pub staging_dir: PathBuf,
    /// Script execution settings.
    pub script: ScriptConfig,
}

/// Script execution configuration (interpreter, script, limits).
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Interpreter binary (absolute path or a name resolved via `PATH`).
    pub interpreter: PathBuf,
    /// Path of the script the interpreter runs.
    pub script_path: PathBuf,
    /// Maximum wall-clock seconds before a running script is killed.
    pub timeout_secs: u64,
    /// Maximum concurrently running script processes. `1` means
    /// single-flight: overlapping requests queue rather than overlap.
    pub max_concurrent: usize,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `8000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `330`                   |
    /// | `RECORDINGS_DIR`        | `data/recordings`       |
    /// | `STAGING_DIR`           | `data/staging`          |
    /// | `SCRIPT_INTERPRETER`    | `python3`               |
    /// | `SCRIPT_PATH`           | `scripts/generate.py`   |
    /// | `SCRIPT_TIMEOUT_SECS`   | `300`                   |
    /// | `SCRIPT_MAX_CONCURRENT` | `1`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "330".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let recordings_dir =
            PathBuf::from(std::env::var("RECORDINGS_DIR").unwrap_or_else(|_| "data/recordings".into()));

        let staging_dir =
            PathBuf::from(std::env::var("STAGING_DIR").unwrap_or_else(|_| "data/staging".into()));

        let script = ScriptConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            recordings_dir,
            staging_dir,
            script,
        }
    }
}

impl ScriptConfig {
    /// Load script execution settings from environment variables.
    pub fn from_env() -> Self {
        let interpreter =
            PathBuf::from(std::env::var("SCRIPT_INTERPRETER").unwrap_or_else(|_| "python3".into()));

        let script_path =
            PathBuf::from(std::env::var("SCRIPT_PATH").unwrap_or_else(|_| "scripts/generate.py".into()));

        let timeout_secs: u64 = std::env::var("SCRIPT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SCRIPT_TIMEOUT_SECS must be a valid u64");

        let max_concurrent: usize = std::env::var("SCRIPT_MAX_CONCURRENT")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("SCRIPT_MAX_CONCURRENT must be a valid usize");

        Self {
            interpreter,
            script_path,
            timeout_secs,
            max_concurrent,
        }
    }
}
