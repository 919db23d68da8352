use crate::models::chart::ChartPoint;
use crate::models::series::TimeSeries;

/// How many daily closes the line chart shows.
const CHART_POINTS: usize = 30;

/// Projects a time series into chart-ready points.
///
/// The core computes all the numbers — the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// The last 30 closes in chronological order (oldest to newest),
    /// ready for a line chart's x/y arrays. Shorter histories yield
    /// however many points exist.
    pub fn price_chart(&self, series: &TimeSeries) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = series
            .iter()
            .rev()
            .take(CHART_POINTS)
            .map(|(date, bar)| ChartPoint {
                date,
                close: bar.close,
            })
            .collect();
        points.reverse();
        points
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
