//! NAV deduplication
//!
//! The indexer records a sample every hour even when nothing moved, so long
//! flat stretches repeat the same NAV. Charts collapse those repeats.
//!
//! Every distinct NAV keeps exactly one sample: the *last* one seen with that
//! NAV, placed where the NAV was *first* seen. This is insert-or-overwrite
//! into an insertion-ordered map keyed by NAV.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::types::LeveragedTokenHistoricalData;

/// Drop samples whose NAV was already seen
///
/// `None` (nothing fetched yet) passes through as `None`; an empty series
/// stays an empty series.
pub fn filter_out_same_nav(
    data: Option<&[LeveragedTokenHistoricalData]>,
) -> Option<Vec<LeveragedTokenHistoricalData>> {
    let data = data?;

    let mut positions: HashMap<u64, usize> = HashMap::with_capacity(data.len());
    let mut cleaned: Vec<LeveragedTokenHistoricalData> = Vec::with_capacity(data.len());

    for sample in data {
        match positions.entry(nav_key(sample.nav)) {
            Entry::Occupied(slot) => cleaned[*slot.get()] = sample.clone(),
            Entry::Vacant(slot) => {
                slot.insert(cleaned.len());
                cleaned.push(sample.clone());
            }
        }
    }

    Some(cleaned)
}

/// Map key for a NAV value
///
/// `0.0` and `-0.0` share a key, and so does every NaN.
fn nav_key(nav: f64) -> u64 {
    if nav == 0.0 {
        0.0f64.to_bits()
    } else if nav.is_nan() {
        f64::NAN.to_bits()
    } else {
        nav.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hour: u32, nav: f64, leverage: f64) -> LeveragedTokenHistoricalData {
        LeveragedTokenHistoricalData::new(format!("2022-03-01T{:02}:00:00Z", hour), nav)
            .leverage_ratio(leverage)
    }

    #[test]
    fn test_none_passes_through() {
        assert!(filter_out_same_nav(None).is_none());
    }

    #[test]
    fn test_empty_stays_empty() {
        let cleaned = filter_out_same_nav(Some(&[])).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_distinct_values_untouched() {
        let series: Vec<_> = (0..5).map(|i| sample(i, i as f64 + 1.0, 2.0)).collect();
        let cleaned = filter_out_same_nav(Some(&series)).unwrap();
        assert_eq!(cleaned, series);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let series = vec![
            sample(0, 100.0, 1.9),
            sample(1, 100.0, 2.0),
            sample(2, 110.0, 2.1),
        ];

        let cleaned = filter_out_same_nav(Some(&series)).unwrap();

        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].nav, 100.0);
        assert_eq!(cleaned[0].timestamp, "2022-03-01T01:00:00Z");
        assert_eq!(cleaned[0].leverage_ratio, 2.0);
        assert_eq!(cleaned[1].nav, 110.0);
    }

    #[test]
    fn test_position_of_first_occurrence_is_kept() {
        // NAV returns to 1.0 after moving away: the hour-3 sample replaces the
        // hour-0 sample but stays in front of 2.0
        let series = vec![
            sample(0, 1.0, 2.0),
            sample(1, 2.0, 2.0),
            sample(2, 3.0, 2.0),
            sample(3, 1.0, 2.5),
        ];

        let cleaned = filter_out_same_nav(Some(&series)).unwrap();
        let navs: Vec<f64> = cleaned.iter().map(|s| s.nav).collect();

        assert_eq!(navs, vec![1.0, 2.0, 3.0]);
        assert_eq!(cleaned[0].timestamp, "2022-03-01T03:00:00Z");
        assert_eq!(cleaned[0].leverage_ratio, 2.5);
    }

    #[test]
    fn test_length_equals_distinct_navs() {
        let navs = [1.0, 1.0, 2.0, 3.0, 2.0, 2.0, 4.0, 1.0];
        let series: Vec<_> = navs
            .iter()
            .enumerate()
            .map(|(i, nav)| sample(i as u32, *nav, i as f64))
            .collect();

        let cleaned = filter_out_same_nav(Some(&series)).unwrap();
        assert_eq!(cleaned.len(), 4);

        // Each survivor carries the fields of its last input occurrence
        for kept in &cleaned {
            let last = series.iter().rev().find(|s| s.nav == kept.nav).unwrap();
            assert_eq!(kept, last);
        }
    }

    #[test]
    fn test_signed_zero_and_nan_keys() {
        let series = vec![
            sample(0, 0.0, 1.0),
            sample(1, -0.0, 2.0),
            sample(2, f64::NAN, 3.0),
            sample(3, f64::NAN, 4.0),
        ];

        let cleaned = filter_out_same_nav(Some(&series)).unwrap();

        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].leverage_ratio, 2.0);
        assert!(cleaned[1].nav.is_nan());
        assert_eq!(cleaned[1].leverage_ratio, 4.0);
    }
}
