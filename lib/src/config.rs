use serde::Deserialize;

/// Configuration for the transform pipeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// ASCII rendering
    pub ascii_width: u32,  // columns, 1-1000, default 40
    pub char_budget: usize, // max characters per text reply, default 4000
    pub glyph_aspect: f32, // glyph cell width/height ratio, default 0.55

    /// Pixelation
    pub pixel_block_size: u32, // 1-256, default 20

    /// Encoding
    pub jpeg_quality: u8, // 1-100, default 90
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            // ASCII rendering
            ascii_width: 40,
            char_budget: 4000,
            glyph_aspect: 0.55,

            // Pixelation
            pixel_block_size: 20,

            // Encoding
            jpeg_quality: 90,
        }
    }
}

impl TransformConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.ascii_width < 1 || self.ascii_width > 1000 {
            return Err(format!("ascii_width must be between 1 and 1000, got {}", self.ascii_width));
        }
        if self.char_budget < 2 {
            return Err(format!("char_budget must be at least 2, got {}", self.char_budget));
        }
        if !(self.glyph_aspect > 0.0 && self.glyph_aspect <= 2.0) {
            return Err(format!("glyph_aspect must be in (0.0, 2.0], got {}", self.glyph_aspect));
        }
        if self.pixel_block_size < 1 || self.pixel_block_size > 256 {
            return Err(format!(
                "pixel_block_size must be between 1 and 256, got {}",
                self.pixel_block_size
            ));
        }
        if self.jpeg_quality < 1 || self.jpeg_quality > 100 {
            return Err(format!("jpeg_quality must be between 1 and 100, got {}", self.jpeg_quality));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TransformConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ascii_width() {
        let mut config = TransformConfig::default();
        config.ascii_width = 0;
        assert!(config.validate().is_err());

        config.ascii_width = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_block_size() {
        let mut config = TransformConfig::default();
        config.pixel_block_size = 0;
        assert!(config.validate().is_err());

        config.pixel_block_size = 257;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_glyph_aspect() {
        let mut config = TransformConfig::default();
        config.glyph_aspect = 0.0;
        assert!(config.validate().is_err());

        config.glyph_aspect = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_jpeg_quality() {
        let config = TransformConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
