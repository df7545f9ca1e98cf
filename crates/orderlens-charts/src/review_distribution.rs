//! Review score distribution bar chart

use crate::{ChartConfig, ChartRenderer};
use async_trait::async_trait;
use orderlens_common::{DashboardError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Bar chart of review counts per score value
#[derive(Debug, Default)]
pub struct ReviewDistributionChart {
    /// (score, count) pairs, ascending by score
    pub data: Vec<(u8, u32)>,
}

impl ReviewDistributionChart {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Set data from the session's review tally
    pub fn set_data(&mut self, tally: Vec<(u8, u32)>) {
        self.data = tally;
        self.data.sort_by_key(|(score, _)| *score);
    }

    /// Highest score on the x axis; the 1-5 rating scale is always
    /// shown in full even when some scores are absent
    fn max_score(&self) -> u8 {
        self.data
            .iter()
            .map(|(score, _)| *score)
            .max()
            .unwrap_or(5)
            .max(5)
    }

    /// Get max count for y-axis scaling
    fn get_max_count(&self) -> f64 {
        if self.data.is_empty() {
            return 10.0;
        }
        self.data
            .iter()
            .map(|(_, count)| *count as f64)
            .fold(0.0, f64::max)
            * 1.1 // 10% headroom
    }

    /// Count for a score, zero when absent from the tally
    fn count_for(&self, score: u8) -> u32 {
        self.data
            .iter()
            .find(|(s, _)| *s == score)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

#[async_trait]
impl ChartRenderer for ReviewDistributionChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(DashboardError::chart("No review data to render"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let max_score = self.max_score();
        let max_count = self.get_max_count();

        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0.5f64..(max_score as f64 + 0.5), 0f64..max_count)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or("Review score"))
            .y_desc(config.y_label.as_deref().unwrap_or("Reviews"))
            .x_labels(max_score as usize)
            .x_label_formatter(&|x| {
                // Label whole scores only
                let rounded = x.round();
                if (x - rounded).abs() < 1e-6 && rounded >= 1.0 {
                    format!("{}", rounded as u8)
                } else {
                    String::new()
                }
            })
            .draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let primary_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        // One bar per score with gaps between bars
        let bar_half_width = 0.4;
        for score in 1..=max_score {
            let count = self.count_for(score);
            let x = score as f64;
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (x - bar_half_width, 0.0),
                    (x + bar_half_width, count as f64),
                ],
                primary_color.filled(),
            )))?;
        }

        root.present()?;
        tracing::info!("Rendered review distribution chart to {}", path.display());
        Ok(())
    }
}
