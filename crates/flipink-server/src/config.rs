use std::path::PathBuf;

/// Render service settings. Environment variables override the defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    /// Root under which each job gets its own directory.
    pub temp_dir: PathBuf,
    /// ffmpeg executable name or path.
    pub ffmpeg: PathBuf,
    /// Frame rate used when a request omits `fps` or sends 0.
    pub default_fps: u32,
    /// Maximum request body in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".into(),
            temp_dir: PathBuf::from("./temp"),
            ffmpeg: PathBuf::from("ffmpeg"),
            default_fps: 10,
            body_limit: 500 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("FLIPINK_BIND") {
            config.bind = v;
        }
        if let Some(v) = lookup("FLIPINK_TEMP_DIR") {
            config.temp_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("FLIPINK_FFMPEG") {
            config.ffmpeg = PathBuf::from(v);
        }
        if let Some(fps) = lookup("FLIPINK_DEFAULT_FPS").and_then(|v| v.parse::<u32>().ok()) {
            if fps > 0 {
                config.default_fps = fps;
            }
        }
        if let Some(limit) = lookup("FLIPINK_BODY_LIMIT").and_then(|v| v.parse::<usize>().ok()) {
            config.body_limit = limit;
        }

        config
    }
}
