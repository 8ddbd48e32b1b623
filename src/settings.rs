/// Image synthesis backend tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEngine {
    PathTracing,
}

/// Output encoding for rendered images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
        }
    }
}

/// Process-wide render configuration, set once before the view loop and
/// identical for every view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub engine: RenderEngine,
    pub file_format: OutputFormat,
    pub film_transparent: bool,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    /// Camera samples per pixel.
    pub samples: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            engine: RenderEngine::PathTracing,
            file_format: OutputFormat::Png,
            film_transparent: true,
            resolution_x: 2048,
            resolution_y: 2048,
            resolution_percentage: 100,
            samples: 32,
        }
    }
}

impl RenderSettings {
    /// Output resolution after applying the percentage scale.
    pub fn effective_resolution(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as u64 * self.resolution_percentage as u64) / 100).max(1) as u32;
        (scale(self.resolution_x), scale(self.resolution_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = RenderSettings::default();
        assert_eq!(s.engine, RenderEngine::PathTracing);
        assert_eq!(s.file_format, OutputFormat::Png);
        assert!(s.film_transparent);
        assert_eq!(s.effective_resolution(), (2048, 2048));
    }

    #[test]
    fn test_resolution_percentage() {
        let s = RenderSettings {
            resolution_percentage: 50,
            ..Default::default()
        };
        assert_eq!(s.effective_resolution(), (1024, 1024));
    }

    #[test]
    fn test_resolution_never_zero() {
        let s = RenderSettings {
            resolution_x: 1,
            resolution_y: 1,
            resolution_percentage: 10,
            ..Default::default()
        };
        assert_eq!(s.effective_resolution(), (1, 1));
    }

    #[test]
    fn test_png_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
    }
}
