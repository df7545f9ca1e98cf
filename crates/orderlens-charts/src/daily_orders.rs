//! Daily order count time series chart

use crate::{ChartConfig, ChartRenderer};
use async_trait::async_trait;
use chrono::NaiveDate;
use orderlens_common::{DashboardError, Result};
use plotters::prelude::*;
use std::path::Path;

/// Time series data point for daily order counts
#[derive(Debug, Clone)]
pub struct DailySeriesPoint {
    pub date: NaiveDate,
    pub order_count: u64,
}

/// Line chart of orders per day with point markers
#[derive(Debug, Default)]
pub struct DailyOrdersChart {
    /// Data points for the time series, ascending by date
    pub data: Vec<DailySeriesPoint>,
}

impl DailyOrdersChart {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Set data from the session's daily series
    pub fn set_data(&mut self, series: Vec<(NaiveDate, u64)>) {
        self.data = series
            .into_iter()
            .map(|(date, order_count)| DailySeriesPoint { date, order_count })
            .collect();
        self.data.sort_by_key(|point| point.date);
    }

    /// Convert data to plotters-compatible format
    fn prepare_plot_data(&self) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.order_count as f64))
            .collect()
    }

    /// Get max count for y-axis scaling
    fn get_max_count(&self) -> f64 {
        if self.data.is_empty() {
            return 10.0;
        }
        self.data
            .iter()
            .map(|d| d.order_count as f64)
            .fold(0.0, f64::max)
            * 1.1 // 10% headroom
    }

    /// Date label for an index position on the x axis
    fn date_label(&self, index: f64) -> String {
        let i = index.round() as usize;
        if (index - i as f64).abs() > 1e-6 {
            return String::new();
        }
        self.data
            .get(i)
            .map(|point| point.date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChartRenderer for DailyOrdersChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.data.is_empty() {
            return Err(DashboardError::chart("No daily order data to render"));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.apply_styling(&root, config)?;

        let plot_data = self.prepare_plot_data();
        let max_count = self.get_max_count();
        let max_x = (self.data.len().saturating_sub(1)).max(1) as f64;

        let title_font = (
            config.style.title_font.family.as_str(),
            config.style.title_font.size,
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, title_font)
            .margin(config.style.margins.top)
            .x_label_area_size(config.style.margins.bottom)
            .y_label_area_size(config.style.margins.left)
            .build_cartesian_2d(0f64..max_x, 0f64..max_count)?;

        // Thin out date labels so long ranges stay readable
        let label_step = (self.data.len() / 10).max(1);
        let formatter = |x: &f64| {
            let i = x.round() as usize;
            if i % label_step == 0 {
                self.date_label(*x)
            } else {
                String::new()
            }
        };

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or("Date"))
            .y_desc(config.y_label.as_deref().unwrap_or("Orders"))
            .x_label_formatter(&formatter);

        if !config.style.grid.show_x && !config.style.grid.show_y {
            mesh.disable_mesh();
        } else if !config.style.grid.show_y {
            mesh.disable_y_mesh();
        } else if !config.style.grid.show_x {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;

        let colors = self.get_colors(&config.style.color_scheme);
        let primary_color = colors.first().copied().unwrap_or(RGBColor(31, 119, 180));

        chart
            .draw_series(LineSeries::new(plot_data.iter().copied(), &primary_color))?
            .label("Orders")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 10, y)], primary_color)
            });

        // Point markers, matching the source dashboard's marker='o' style
        chart.draw_series(
            plot_data
                .iter()
                .map(|point| Circle::new(*point, 3, primary_color.filled())),
        )?;

        chart.configure_series_labels().draw()?;

        root.present()?;
        tracing::info!("Rendered daily orders chart to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_set_data_sorts_by_date() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![
            (date(2024, 1, 3), 5),
            (date(2024, 1, 1), 2),
            (date(2024, 1, 2), 7),
        ]);

        assert_eq!(chart.data[0].date, date(2024, 1, 1));
        assert_eq!(chart.data[2].date, date(2024, 1, 3));
    }

    #[test]
    fn test_prepare_plot_data() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![(date(2024, 1, 1), 10), (date(2024, 1, 2), 20)]);

        let plot_data = chart.prepare_plot_data();
        assert_eq!(plot_data, vec![(0.0, 10.0), (1.0, 20.0)]);
    }

    #[test]
    fn test_get_max_count() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![(date(2024, 1, 1), 10), (date(2024, 1, 2), 25)]);

        assert!((chart.get_max_count() - 27.5).abs() < 1e-10);
    }

    #[test]
    fn test_date_labels() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![(date(2024, 1, 1), 10)]);

        assert_eq!(chart.date_label(0.0), "2024-01-01");
        assert_eq!(chart.date_label(5.0), "");
    }

    #[tokio::test]
    async fn test_render_to_file() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![
            (date(2024, 1, 1), 10),
            (date(2024, 1, 2), 20),
            (date(2024, 1, 3), 15),
        ]);

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("daily_orders.png");

        let mut config = ChartConfig::default();
        config.title = "Daily Orders".to_string();

        let result = chart.render_to_file(&config, &path).await;
        assert!(result.is_ok(), "Failed to render chart: {:?}", result.err());
        assert!(path.exists());

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 1000, "Generated chart file is too small");
    }

    #[tokio::test]
    async fn test_render_single_point() {
        let mut chart = DailyOrdersChart::new();
        chart.set_data(vec![(date(2024, 1, 1), 3)]);

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("single_point.png");

        let result = chart.render_to_file(&ChartConfig::default(), &path).await;
        assert!(result.is_ok(), "Failed to render chart: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_render_empty_data_error() {
        let chart = DailyOrdersChart::new();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("empty.png");

        let result = chart.render_to_file(&ChartConfig::default(), &path).await;
        assert!(result.is_err(), "Should fail with empty data");
    }
}
