use crate::models::{
    ChartPoint, ChartProjection, ChartResponse, ChartSeries, Entry, Metric, ProjectedPoint,
    TargetBand, TargetRange,
};
use chrono::NaiveDate;

const PADDING_LOW: f64 = 0.9;
const PADDING_HIGH: f64 = 1.1;
const GRID_DIVISIONS: usize = 4;
const VISIBLE_LABELS: usize = 6;

/// Oldest-first points for one metric. Entries without the metric are skipped
/// but still take up an index, so sparse readings keep their spacing.
pub fn build_series(entries: &[Entry], metric: Metric) -> ChartSeries {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let points = sorted
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            metric.value_of(entry).map(|value| ChartPoint {
                index,
                value,
                date: entry.date,
            })
        })
        .collect();

    ChartSeries { points }
}

/// Scales a series into 0..1 fractions on both axes. Pixel mapping is left to the renderer.
pub fn project(
    series: &ChartSeries,
    target_min: Option<f64>,
    target_max: Option<f64>,
) -> ChartProjection {
    let (y_min, padded_max) = scale_bounds(series, target_min, target_max);
    let y_range = if padded_max - y_min > 0.0 {
        padded_max - y_min
    } else {
        1.0
    };
    let y_max = y_min + y_range;
    let y_fraction = |value: f64| (value - y_min) / y_range;

    let max_index = series.points.iter().map(|point| point.index).max().unwrap_or(0);
    let points = series
        .points
        .iter()
        .map(|point| ProjectedPoint {
            index: point.index,
            value: point.value,
            x: if max_index == 0 {
                0.0
            } else {
                point.index as f64 / max_index as f64
            },
            y: y_fraction(point.value),
        })
        .collect();

    // With no readings the axis ignores the targets, so the band would collapse.
    let band = match (target_min, target_max) {
        (Some(min), Some(max)) if !series.points.is_empty() => {
            let (a, b) = (y_fraction(min).clamp(0.0, 1.0), y_fraction(max).clamp(0.0, 1.0));
            Some(TargetBand {
                low: a.min(b),
                high: a.max(b),
            })
        }
        _ => None,
    };

    ChartProjection {
        y_min,
        y_max,
        points,
        band,
    }
}

fn scale_bounds(series: &ChartSeries, target_min: Option<f64>, target_max: Option<f64>) -> (f64, f64) {
    if series.points.is_empty() {
        return (0.0, 1.0);
    }

    let values = series.points.iter().map(|point| point.value);
    let raw_min = values
        .clone()
        .chain(target_min)
        .fold(f64::INFINITY, f64::min);
    let raw_max = values.chain(target_max).fold(f64::NEG_INFINITY, f64::max);

    (raw_min * PADDING_LOW, raw_max * PADDING_HIGH)
}

/// Everything the renderer needs for one metric's chart.
pub fn chart_for(entries: &[Entry], metric: Metric, target: TargetRange) -> ChartResponse {
    let series = build_series(entries, metric);
    let projection = project(&series, Some(target.min), Some(target.max));
    let label_stride = label_stride(series.points.len());

    ChartResponse {
        metric,
        unit: metric.unit(),
        target,
        series,
        projection,
        grid: grid_fractions(),
        label_stride,
    }
}

/// Horizontal gridlines at quarter steps, both edges included.
pub fn grid_fractions() -> [f64; GRID_DIVISIONS + 1] {
    std::array::from_fn(|i| i as f64 / GRID_DIVISIONS as f64)
}

/// Show a label only where `index % stride == 0`.
pub fn label_stride(label_count: usize) -> usize {
    (label_count / VISIBLE_LABELS).max(1)
}

/// `MM-DD`, the trailing part of the stored date.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(usize, f64)]) -> ChartSeries {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        ChartSeries {
            points: values
                .iter()
                .map(|&(index, value)| ChartPoint { index, value, date })
                .collect(),
        }
    }

    fn entry(id: &str, date: &str, po4: Option<f64>, no3: Option<f64>) -> Entry {
        Entry {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            po4,
            no3,
            notes: String::new(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn project_pads_bounds_by_ten_percent() {
        let projection = project(&series(&[(0, 1.0), (1, 2.0), (2, 3.0)]), None, None);

        assert!(close(projection.y_min, 0.9));
        assert!(close(projection.y_max, 3.3));
        assert!(close(projection.points[0].y, 0.1 / 2.4));
        assert!(close(projection.points[2].x, 1.0));
        assert!(projection.band.is_none());
    }

    #[test]
    fn project_single_point_has_nonzero_range() {
        let projection = project(&series(&[(0, 5.0)]), None, None);

        assert!(close(projection.y_min, 4.5));
        assert!(close(projection.y_max, 5.5));
        assert_eq!(projection.points[0].x, 0.0);
        assert!(projection.points[0].y.is_finite());
    }

    #[test]
    fn project_all_zero_values_falls_back_to_unit_range() {
        let projection = project(&series(&[(0, 0.0), (1, 0.0)]), None, None);

        assert_eq!(projection.y_min, 0.0);
        assert_eq!(projection.y_max, 1.0);
        assert!(projection.points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn project_keeps_target_band_visible() {
        let projection = project(&series(&[(0, 0.5), (1, 1.2), (3, 1.8)]), Some(2.0), Some(15.0));

        let band = projection.band.expect("band");
        assert!(band.low >= 0.0 && band.high <= 1.0);
        assert!(band.low < band.high);
        assert!(projection.points.iter().all(|p| p.y < band.low));
        assert!(close(projection.y_max, 16.5));
    }

    #[test]
    fn project_swaps_inverted_band() {
        let projection = project(&series(&[(0, 5.0), (1, 10.0)]), Some(15.0), Some(2.0));

        let band = projection.band.expect("band");
        assert!(band.low <= band.high);
    }

    #[test]
    fn project_empty_series_uses_unit_bounds() {
        let projection = project(&ChartSeries::default(), None, None);

        assert_eq!((projection.y_min, projection.y_max), (0.0, 1.0));
        assert!(projection.points.is_empty());
    }

    #[test]
    fn project_empty_series_has_no_band() {
        let projection = project(&ChartSeries::default(), Some(2.0), Some(15.0));

        assert_eq!((projection.y_min, projection.y_max), (0.0, 1.0));
        assert!(projection.band.is_none());
    }

    #[test]
    fn x_is_normalized_by_max_index_not_length() {
        let projection = project(&series(&[(0, 1.0), (4, 2.0)]), None, None);

        assert_eq!(projection.points[0].x, 0.0);
        assert_eq!(projection.points[1].x, 1.0);
    }

    #[test]
    fn build_series_preserves_gaps() {
        let entries = vec![
            entry("c", "2025-02-03", Some(0.07), Some(8.0)),
            entry("a", "2025-02-01", Some(0.05), None),
            entry("b", "2025-02-02", None, Some(6.0)),
        ];

        let po4 = build_series(&entries, Metric::Po4);
        let indices: Vec<usize> = po4.points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 2]);

        let no3 = build_series(&entries, Metric::No3);
        let indices: Vec<usize> = no3.points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(no3.points[0].value, 6.0);
    }

    #[test]
    fn grid_has_four_equal_subdivisions() {
        assert_eq!(grid_fractions(), [0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn label_stride_targets_six_labels() {
        assert_eq!(label_stride(24), 4);
        assert_eq!(label_stride(3), 1);
        assert_eq!(label_stride(0), 1);
    }

    #[test]
    fn short_label_is_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(short_label(date), "07-04");
    }
}
