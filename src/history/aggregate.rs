//! Timeframe windowing
//!
//! Slices a deduplicated series into trailing windows and computes the NAV
//! change across each one. Window sizes come from [`Timeframe::samples`].

use serde::Serialize;

use super::error::{HistoryError, HistoryResult};
use super::types::{LeveragedTokenHistoricalData, Timeframe, TimeframeData};

/// All five timeframe windows of one series
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTimeframes {
    pub daily: TimeframeData,
    pub weekly: TimeframeData,
    pub two_weekly: TimeframeData,
    pub monthly: TimeframeData,
    pub three_monthly: TimeframeData,
}

impl HistoricalTimeframes {
    /// Get the window for a timeframe
    pub fn get(&self, timeframe: Timeframe) -> &TimeframeData {
        match timeframe {
            Timeframe::Daily => &self.daily,
            Timeframe::Weekly => &self.weekly,
            Timeframe::TwoWeekly => &self.two_weekly,
            Timeframe::Monthly => &self.monthly,
            Timeframe::ThreeMonthly => &self.three_monthly,
        }
    }
}

/// Percent change from `oldest` to `latest`
///
/// A zero `oldest` gives ±infinity or NaN; callers decide how to show it.
pub fn percent_change(oldest: f64, latest: f64) -> f64 {
    (latest - oldest) / oldest * 100.0
}

/// Build the trailing window for one timeframe
///
/// Takes the last `timeframe.samples()` entries, or the whole series when it
/// is shorter. Fails with [`HistoryError::InsufficientData`] when there is no
/// sample to read a NAV from.
pub fn aggregate_timeframe(
    series: &[LeveragedTokenHistoricalData],
    timeframe: Timeframe,
) -> HistoryResult<TimeframeData> {
    let start = series.len().saturating_sub(timeframe.samples());
    let window = &series[start..];

    let (oldest, latest) = match (window.first(), window.last()) {
        (Some(oldest), Some(latest)) => (oldest.nav, latest.nav),
        _ => return Err(HistoryError::InsufficientData { timeframe }),
    };

    Ok(TimeframeData {
        latest_nav: latest,
        oldest_nav: oldest,
        change: percent_change(oldest, latest),
        data: window.to_vec(),
    })
}

/// Build every window in [`Timeframe::ALL`]
pub fn aggregate_timeframes(
    series: &[LeveragedTokenHistoricalData],
) -> HistoryResult<HistoricalTimeframes> {
    let [daily, weekly, two_weekly, monthly, three_monthly] =
        Timeframe::ALL.map(|timeframe| aggregate_timeframe(series, timeframe));

    Ok(HistoricalTimeframes {
        daily: daily?,
        weekly: weekly?,
        two_weekly: two_weekly?,
        monthly: monthly?,
        three_monthly: three_monthly?,
    })
}
