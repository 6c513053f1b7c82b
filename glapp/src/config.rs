//! Runtime configuration for the demo window

use std::path::PathBuf;

/// Environment variable overriding [`AppConfig::texture_path`].
pub const TEXTURE_ENV: &str = "GLAPP_TEXTURE";
/// Environment variable overriding [`AppConfig::vsync`]. Accepts `0`/`1`,
/// `true`/`false`, `on`/`off`.
pub const VSYNC_ENV: &str = "GLAPP_VSYNC";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_title: String,
    /// Logical inner size
    pub window_size: (f64, f64),
    /// Requested core profile version
    pub gl_version: (u8, u8),
    pub vsync: bool,
    /// Image mapped onto the cube faces
    pub texture_path: PathBuf,
    pub clear_color: [f32; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "glapp".to_string(),
            window_size: (1280.0, 800.0),
            gl_version: (3, 3),
            vsync: true,
            texture_path: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/square.png")),
            clear_color: [1.0, 1.0, 1.0],
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_path = path.into();
        self
    }

    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up through `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(TEXTURE_ENV).filter(|p| !p.trim().is_empty()) {
            self.texture_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(VSYNC_ENV) {
            match parse_flag(&raw) {
                Some(vsync) => self.vsync = vsync,
                None => tracing::warn!(target: "glapp", "ignoring {VSYNC_ENV}={raw:?}"),
            }
        }
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
