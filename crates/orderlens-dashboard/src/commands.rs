//! Dashboard command parsing and execution

use chrono::NaiveDate;
use orderlens_charts::{ChartConfig, ChartRenderer, ColorScheme, DailyOrdersChart, ReviewDistributionChart};
use orderlens_common::{format_currency, format_date, DashboardError, Result};
use orderlens_config::Config;
use orderlens_data::DashboardSession;
use std::path::PathBuf;
use tracing::{info, warn};

/// The two selectable chart topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTopic {
    /// Customer review score distribution
    Reviews,
    /// Daily orders and revenue
    Daily,
}

/// One parsed line of dashboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chart(ChartTopic),
    Metrics {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Range,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parse a line of user input into a command
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["chart", "reviews"] => Ok(Self::Chart(ChartTopic::Reviews)),
            ["chart", "daily"] => Ok(Self::Chart(ChartTopic::Daily)),
            ["chart", other] => Err(DashboardError::validation_field(
                format!("Unknown chart topic '{other}' (expected 'reviews' or 'daily')"),
                "topic",
            )),
            ["metrics"] => Ok(Self::Metrics {
                start: None,
                end: None,
            }),
            ["metrics", start, end] => Ok(Self::Metrics {
                start: Some(parse_date(start, "start_date")?),
                end: Some(parse_date(end, "end_date")?),
            }),
            ["range"] => Ok(Self::Range),
            ["reload"] => Ok(Self::Reload),
            ["help"] => Ok(Self::Help),
            ["quit"] | ["exit"] => Ok(Self::Quit),
            [] => Err(DashboardError::validation("Empty command")),
            _ => Err(DashboardError::validation(format!(
                "Unknown command '{}' (try 'help')",
                line.trim()
            ))),
        }
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        DashboardError::validation_field(
            format!("Invalid date '{value}' (expected YYYY-MM-DD)"),
            field,
        )
    })
}

/// Executes dashboard commands against the session.
///
/// Owns the only mutable handle to the session; each interaction
/// re-runs the range filter at most, never the loader or aggregations
/// (except for an explicit `reload`).
pub struct Dashboard {
    session: DashboardSession,
    config: Config,
}

impl Dashboard {
    pub fn new(session: DashboardSession, config: Config) -> Self {
        Self { session, config }
    }

    /// Execute one command, returning the user-facing output lines
    pub async fn execute(&mut self, command: Command) -> Result<Vec<String>> {
        match command {
            Command::Chart(topic) => self.render_chart(topic).await,
            Command::Metrics { start, end } => self.metrics(start, end),
            Command::Range => Ok(self.range()),
            Command::Reload => self.reload(),
            Command::Help => Ok(help_text()),
            Command::Quit => Ok(vec!["Goodbye.".to_string()]),
        }
    }

    async fn render_chart(&self, topic: ChartTopic) -> Result<Vec<String>> {
        let charts = &self.config.charts;
        std::fs::create_dir_all(&charts.output_dir)?;

        let mut config = ChartConfig::with_dimensions("", charts.width, charts.height);
        config.style.background_color = Some(charts.background_color.clone());
        config.style.color_scheme = ColorScheme::Custom(vec![charts.primary_color.clone()]);

        let path = match topic {
            ChartTopic::Reviews => {
                let tally = self.session.review_tally();
                if tally.is_empty() {
                    warn!("Review data requested but unavailable");
                    return Ok(vec!["Review data is not available.".to_string()]);
                }

                config.title = "Review Score Distribution".to_string();
                config.x_label = Some("Review score".to_string());
                config.y_label = Some("Reviews".to_string());

                let mut chart = ReviewDistributionChart::new();
                chart.set_data(tally);
                let path = self.chart_path("review_distribution.png");
                chart.render_to_file(&config, &path).await?;
                path
            }
            ChartTopic::Daily => {
                let series = self.session.daily_series();
                if series.is_empty() {
                    warn!("Daily order data requested but unavailable");
                    return Ok(vec!["Daily order data is not available.".to_string()]);
                }

                config.title = "Daily Orders".to_string();
                config.x_label = Some("Date".to_string());
                config.y_label = Some("Orders".to_string());

                let mut chart = DailyOrdersChart::new();
                chart.set_data(series);
                let path = self.chart_path("daily_orders.png");
                chart.render_to_file(&config, &path).await?;
                path
            }
        };

        Ok(vec![format!("Chart written to {}", path.display())])
    }

    fn metrics(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Vec<String>> {
        // Bounds default to the full extent of the daily table
        let (min, max) = match (self.session.min_date(), self.session.max_date()) {
            (Some(min), Some(max)) => (min, max),
            _ => return Ok(vec!["No data available.".to_string()]),
        };
        let start = start.unwrap_or(min);
        let end = end.unwrap_or(max);

        let totals = self.session.compute_totals(start, end);
        info!(
            "Computed totals for {}..={}: {} orders",
            start, end, totals.total_orders
        );

        if totals.total_orders == 0 {
            return Ok(vec![format!(
                "No data available from {} to {}.",
                format_date(start),
                format_date(end)
            )]);
        }

        Ok(vec![
            format!(
                "Total orders from {} to {}: {}",
                format_date(start),
                format_date(end),
                totals.total_orders
            ),
            format!(
                "Total revenue from {} to {}: {}",
                format_date(start),
                format_date(end),
                format_currency(totals.total_revenue)
            ),
        ])
    }

    fn range(&self) -> Vec<String> {
        match (self.session.min_date(), self.session.max_date()) {
            (Some(min), Some(max)) => vec![format!(
                "Data available from {} to {}.",
                format_date(min),
                format_date(max)
            )],
            _ => vec!["No data available.".to_string()],
        }
    }

    fn reload(&mut self) -> Result<Vec<String>> {
        self.session.reload()?;
        Ok(vec![format!(
            "Reloaded dataset: {} orders.",
            self.session.order_count()
        )])
    }

    fn chart_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.config.charts.output_dir).join(file_name)
    }
}

fn help_text() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  chart reviews        render the review score distribution chart".to_string(),
        "  chart daily          render the daily orders chart".to_string(),
        "  metrics [START END]  total orders and revenue for a date range (YYYY-MM-DD)".to_string(),
        "  range                show the available date bounds".to_string(),
        "  reload               re-read the dataset from disk".to_string(),
        "  help                 show this message".to_string(),
        "  quit                 exit the dashboard".to_string(),
    ]
}
