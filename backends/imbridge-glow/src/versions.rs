//! OpenGL version detection and per-context capabilities

use std::collections::HashSet;

use glow::{Context, HasContext};

/// OpenGL version parsed from `GL_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_es: bool,
}

impl GlVersion {
    pub fn read(gl: &Context) -> Self {
        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        Self::parse(&version_string)
    }

    /// Parses strings such as `"4.6.0 NVIDIA 535.54"` or
    /// `"OpenGL ES 3.2 Mesa 23.1"`.
    pub fn parse(version_string: &str) -> Self {
        let is_es = version_string.contains("OpenGL ES") || version_string.contains("WebGL");
        let default = if is_es { (2, 0) } else { (2, 1) };
        let (major, minor) = Self::parse_version_numbers(version_string).unwrap_or(default);
        Self {
            major,
            minor,
            is_es,
        }
    }

    fn parse_version_numbers(version_string: &str) -> Option<(u32, u32)> {
        version_string.split_whitespace().find_map(|word| {
            let (major, rest) = word.split_once('.')?;
            let minor = rest.split('.').next()?;
            Some((major.parse().ok()?, minor.parse().ok()?))
        })
    }

    pub fn at_least(self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// `glBindSampler`: GL 3.3 / ES 3.0.
    pub fn sampler_support(self) -> bool {
        if self.is_es {
            self.at_least(3, 0)
        } else {
            self.at_least(3, 3)
        }
    }

    /// `glPolygonMode` exists on desktop GL only.
    pub fn polygon_mode_support(self) -> bool {
        !self.is_es
    }
}

/// Capabilities of one GL context, queried once at initialization.
#[derive(Debug, Clone)]
pub struct GlCapabilities {
    pub version: GlVersion,
    pub extensions: HashSet<String>,
}

impl GlCapabilities {
    pub fn query(gl: &Context) -> Self {
        let caps = Self {
            version: GlVersion::read(gl),
            extensions: gl.supported_extensions().clone(),
        };
        tracing::info!(
            target: "imbridge_glow",
            "OpenGL {}.{}{} with {} extensions",
            caps.version.major,
            caps.version.minor,
            if caps.version.is_es { " ES" } else { "" },
            caps.extensions.len()
        );
        tracing::debug!(target: "imbridge_glow", extensions = ?caps.extensions, "GL extensions");
        caps
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }
}
