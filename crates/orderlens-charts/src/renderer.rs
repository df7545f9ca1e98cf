//! Chart rendering trait and shared styling helpers

use crate::{ChartConfig, ColorScheme};
use plotters::prelude::*;
use std::path::Path;
use orderlens_common::Result;

/// Trait for rendering charts with shared styling helpers
#[async_trait::async_trait]
pub trait ChartRenderer {
    /// Render the chart to a file path
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Apply background styling to the drawing area
    fn apply_styling<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, plotters::coord::Shift>,
        config: &ChartConfig,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let bg_color = self.get_background_color(config);
        root.fill(&bg_color)?;
        Ok(())
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
            ],
            ColorScheme::Dark => vec![
                RGBColor(55, 126, 184),  // Light Blue
                RGBColor(255, 152, 150), // Light Red
                RGBColor(77, 175, 74),   // Light Green
                RGBColor(255, 187, 120), // Light Orange
            ],
            ColorScheme::Light => vec![
                RGBColor(166, 206, 227), // Pale Blue
                RGBColor(251, 180, 174), // Pale Red
                RGBColor(179, 226, 205), // Pale Green
                RGBColor(253, 205, 172), // Pale Orange
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &ChartConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartConfig;

    struct MockRenderer;

    #[async_trait::async_trait]
    impl ChartRenderer for MockRenderer {
        async fn render_to_file(&self, _config: &ChartConfig, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_color_schemes() {
        let renderer = MockRenderer;

        let default_colors = renderer.get_colors(&ColorScheme::Default);
        assert!(!default_colors.is_empty());
        assert_eq!(default_colors[0], RGBColor(31, 119, 180));

        let custom = ColorScheme::Custom(vec![
            "#FF0000".to_string(),
            "#00FF00".to_string(),
        ]);
        let colors = renderer.get_colors(&custom);
        assert_eq!(colors, vec![RGBColor(255, 0, 0), RGBColor(0, 255, 0)]);
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;

        assert_eq!(renderer.parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(renderer.parse_color("#1F77B4"), RGBColor(31, 119, 180));
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_background_color() {
        let renderer = MockRenderer;
        let mut config = ChartConfig::default();

        assert_eq!(renderer.get_background_color(&config), RGBColor(255, 255, 255));

        config.style.background_color = Some("#2B2B2B".to_string());
        assert_eq!(renderer.get_background_color(&config), RGBColor(43, 43, 43));
    }
}
