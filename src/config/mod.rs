use std::env;
use std::path::PathBuf;

/// Server configuration for the grid transfer backend
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory served as static assets (default: "public")
    pub public_dir: PathBuf,

    /// Directory holding canonical grid files and derived surfaces
    /// (default: "public/uploads")
    pub uploads_dir: PathBuf,

    /// Path to the grid2gridTransfer executable (default: resolved via PATH)
    pub tool_path: PathBuf,

    /// Hard deadline for a single tool invocation in seconds (default: 300)
    pub tool_timeout_secs: u64,

    /// Maximum accepted request body size in bytes (default: 1 GiB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            uploads_dir: PathBuf::from("public/uploads"),
            tool_path: PathBuf::from("grid2gridTransfer"),
            tool_timeout_secs: 300,
            max_upload_size: 1024 * 1024 * 1024, // 1 GiB
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.public_dir),

            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.uploads_dir),

            tool_path: env::var("G2G_TOOL_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.tool_path),

            tool_timeout_secs: env::var("G2G_TOOL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.tool_timeout_secs),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),
        }
    }

    /// Create config for development (scratch dirs, short tool deadline)
    pub fn development() -> Self {
        Self {
            tool_timeout_secs: 30,
            ..Self::default()
        }
    }
}
