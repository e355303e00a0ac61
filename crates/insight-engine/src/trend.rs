//! Seasonal trend statistics over historical price series

use chrono::{Datelike, Utc};
use insight_core::{MarketDataProvider, PricePoint, TrendReport};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Derives descriptive seasonal statistics from daily closing prices
///
/// Every report is computed fresh from a new history fetch; nothing is
/// cached between calls.
pub struct TrendAnalyzer {
    market: Arc<dyn MarketDataProvider>,
}

impl TrendAnalyzer {
    pub fn new(market: Arc<dyn MarketDataProvider>) -> Self {
        Self { market }
    }

    /// Analyze `years` of history for `symbol`
    ///
    /// Callers validate `years >= 1` at the boundary. Returns `None` when
    /// the provider fails or the series is empty or unusable.
    #[instrument(skip(self), fields(symbol = %symbol, years = years))]
    pub async fn analyze(&self, symbol: &str, years: u32) -> Option<TrendReport> {
        let end = Utc::now().date_naive();
        let start = end - chrono::Duration::days(i64::from(years) * 365);

        let points = match self.market.price_history(symbol, start, end).await {
            Ok(points) => points,
            Err(e) => {
                warn!("History fetch failed for {symbol}: {e}");
                return None;
            }
        };

        debug!("Analyzing {} price points", points.len());
        compute_report(symbol, years, &points)
    }
}

fn compute_report(symbol: &str, years: u32, points: &[PricePoint]) -> Option<TrendReport> {
    let usable: Vec<&PricePoint> = points.iter().filter(|p| p.close.is_finite()).collect();

    let first = usable.first()?;
    let last = usable.last()?;
    if first.close == 0.0 {
        return None;
    }

    let mut sums = [0.0_f64; 12];
    let mut counts = [0_usize; 12];
    for point in &usable {
        let month = point.date.month0() as usize;
        sums[month] += point.close;
        counts[month] += 1;
    }

    // Ascending iteration keeps the lowest month number on mean ties
    let mut peak: Option<(usize, f64)> = None;
    let mut dip: Option<(usize, f64)> = None;
    for month in 0..12 {
        if counts[month] == 0 {
            continue;
        }
        let mean = sums[month] / counts[month] as f64;
        if peak.is_none_or(|(_, best)| mean > best) {
            peak = Some((month, mean));
        }
        if dip.is_none_or(|(_, best)| mean < best) {
            dip = Some((month, mean));
        }
    }

    let (peak_month, _) = peak?;
    let (dip_month, _) = dip?;

    let overall = (last.close - first.close) / first.close * 100.0;

    Some(TrendReport {
        symbol: symbol.to_string(),
        period_years: years,
        overall_change_percent: round2(overall),
        typical_dip_month: MONTH_NAMES[dip_month].to_string(),
        typical_peak_month: MONTH_NAMES[peak_month].to_string(),
        latest_price: round2(last.close),
        data_point_count: usable.len(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mockall::mock;

    mock! {
        Market {}

        #[async_trait]
        impl MarketDataProvider for Market {
            async fn price_history(
                &self,
                symbol: &str,
                start: NaiveDate,
                end: NaiveDate,
            ) -> insight_core::Result<Vec<PricePoint>>;

            async fn probe_symbol(&self, symbol: &str) -> bool;
        }
    }

    fn point(year: i32, month: u32, day: u32, close: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            close,
        }
    }

    #[test]
    fn test_empty_series_is_none() {
        assert!(compute_report("AAPL", 3, &[]).is_none());
    }

    #[test]
    fn test_flat_series_zero_change() {
        let points: Vec<PricePoint> = (1..=12)
            .map(|month| point(2024, month, 15, 100.0))
            .collect();

        let report = compute_report("AAPL", 3, &points).unwrap();
        assert_eq!(report.overall_change_percent, 0.0);
        assert_eq!(report.latest_price, 100.0);
        assert_eq!(report.data_point_count, 12);
    }

    #[test]
    fn test_peak_and_dip_months() {
        let points = vec![
            point(2024, 1, 10, 100.0),
            point(2024, 2, 10, 150.0),
            point(2024, 3, 10, 50.0),
        ];

        let report = compute_report("AAPL", 1, &points).unwrap();
        assert_eq!(report.typical_peak_month, "February");
        assert_eq!(report.typical_dip_month, "March");
    }

    #[test]
    fn test_mean_tie_resolves_to_lowest_month() {
        // February and November share the peak mean; March and December
        // share the dip mean
        let points = vec![
            point(2023, 2, 10, 200.0),
            point(2023, 3, 10, 50.0),
            point(2023, 11, 10, 200.0),
            point(2023, 12, 10, 50.0),
        ];

        let report = compute_report("AAPL", 1, &points).unwrap();
        assert_eq!(report.typical_peak_month, "February");
        assert_eq!(report.typical_dip_month, "March");
    }

    #[test]
    fn test_overall_change_uses_first_and_last_observation() {
        let points = vec![
            point(2022, 6, 1, 80.0),
            point(2023, 1, 1, 120.0),
            point(2024, 5, 30, 100.0),
        ];

        let report = compute_report("AAPL", 2, &points).unwrap();
        assert_eq!(report.overall_change_percent, 25.0);
        assert_eq!(report.latest_price, 100.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let points = vec![point(2024, 1, 1, 3.0), point(2024, 2, 1, 4.0)];

        let report = compute_report("AAPL", 1, &points).unwrap();
        // (4 - 3) / 3 * 100 = 33.333...
        assert_eq!(report.overall_change_percent, 33.33);
    }

    #[test]
    fn test_monthly_means_across_years() {
        // January mean is (100 + 200) / 2 = 150, above June's 140
        let points = vec![
            point(2023, 1, 10, 100.0),
            point(2024, 1, 10, 200.0),
            point(2023, 6, 10, 140.0),
        ];

        let report = compute_report("AAPL", 2, &points).unwrap();
        assert_eq!(report.typical_peak_month, "January");
        assert_eq!(report.typical_dip_month, "June");
    }

    #[test]
    fn test_zero_first_close_is_none() {
        let points = vec![point(2024, 1, 1, 0.0), point(2024, 2, 1, 10.0)];
        assert!(compute_report("AAPL", 1, &points).is_none());
    }

    #[tokio::test]
    async fn test_analyze_degrades_on_provider_error() {
        let mut market = MockMarket::new();
        market.expect_price_history().returning(|_, _, _| {
            Err(insight_core::InsightError::MarketDataError(
                "unavailable".to_string(),
            ))
        });

        let analyzer = TrendAnalyzer::new(Arc::new(market));
        assert!(analyzer.analyze("AAPL", 3).await.is_none());
    }

    #[tokio::test]
    async fn test_analyze_constant_three_year_series() {
        let mut market = MockMarket::new();
        market.expect_price_history().returning(|_, start, end| {
            let mut points = Vec::new();
            let mut date = start;
            while date <= end {
                points.push(PricePoint { date, close: 100.0 });
                date += chrono::Duration::days(7);
            }
            Ok(points)
        });

        let analyzer = TrendAnalyzer::new(Arc::new(market));
        let report = analyzer.analyze("AAPL", 3).await.unwrap();
        assert_eq!(report.overall_change_percent, 0.0);
        assert_eq!(report.latest_price, 100.0);
        assert_eq!(report.period_years, 3);
    }
}
