use ratatui::style::Color;

use crate::series::{ScatterSeries, Shade};

/// Number of distinct ramp colors a series is bucketed into; one ratatui
/// `Dataset` carries one style, so shading resolves to one dataset per step.
pub const RAMP_STEPS: usize = 8;

/// Compute padded `[min, max]` axis bounds for the chart.
/// Degenerate extents widen by one unit so ratatui always gets a real span.
pub fn compute_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if points.is_empty() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    // keep the y baseline anchored at zero for time/percentage axes
    ([x_min, x_max], [y_min.min(0.0), y_max])
}

/// Map a normalized value onto the blue -> green -> orange -> red ramp
/// the upstream analysis used for its colormap.
pub fn ramp_color(t: f64) -> Color {
    const STOPS: [(u8, u8, u8); 4] = [
        (0, 0, 255),
        (0, 160, 0),
        (255, 165, 0),
        (255, 0, 0),
    ];

    let t = t.clamp(0.0, 1.0);
    let scaled = t * (STOPS.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = STOPS[idx];
    let (r1, g1, b1) = STOPS[idx + 1];

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Fallback mark color when a series has no spread to shade over.
pub fn uniform_color() -> Color {
    ramp_color(0.5)
}

/// Split a series into per-color point groups for rendering.
/// `Shade::Ramp` buckets each point by its normalized value; `Shade::Uniform`
/// yields a single mid-ramp group.
pub fn shade_buckets(series: &ScatterSeries) -> Vec<(Color, Vec<(f64, f64)>)> {
    match &series.shade {
        Shade::Uniform => {
            if series.points.is_empty() {
                vec![]
            } else {
                vec![(uniform_color(), series.points.clone())]
            }
        }
        Shade::Ramp(values) => {
            let mut buckets: Vec<Vec<(f64, f64)>> = vec![Vec::new(); RAMP_STEPS];
            for (&point, &v) in series.points.iter().zip(values.iter()) {
                let idx = ((v * RAMP_STEPS as f64) as usize).min(RAMP_STEPS - 1);
                buckets[idx].push(point);
            }

            buckets
                .into_iter()
                .enumerate()
                .filter(|(_, points)| !points.is_empty())
                .map(|(i, points)| {
                    let center = (i as f64 + 0.5) / RAMP_STEPS as f64;
                    (ramp_color(center), points)
                })
                .collect()
        }
    }
}

/// Sampled points for a band's baseline strip between its bounds.
pub fn band_strip(lo: u32, hi: u32, y: f64) -> Vec<(f64, f64)> {
    const SAMPLES: usize = 48;
    let lo = lo as f64;
    let hi = hi as f64;
    let step = (hi - lo) / SAMPLES as f64;

    (0..=SAMPLES).map(|i| (lo + step * i as f64, y)).collect()
}

/// Palette for band overlays, cycled by band index.
pub fn band_color(index: usize) -> Color {
    const PALETTE: [Color; 4] = [Color::Blue, Color::Green, Color::Yellow, Color::Magenta];
    PALETTE[index % PALETTE.len()]
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PlotKind;

    #[test]
    fn bounds_pad_degenerate_extents() {
        let ([x0, x1], [y0, y1]) = compute_bounds(&[(5.0, 3.0)]);
        assert_eq!((x0, x1), (4.0, 6.0));
        assert_eq!((y0, y1), (0.0, 4.0));
    }

    #[test]
    fn bounds_of_empty_series_are_unit() {
        let (x, y) = compute_bounds(&[]);
        assert_eq!(x, [0.0, 1.0]);
        assert_eq!(y, [0.0, 1.0]);
    }

    #[test]
    fn bounds_anchor_y_at_zero() {
        let (_, [y0, y1]) = compute_bounds(&[(1.0, 2.0), (3.0, 8.0)]);
        assert_eq!(y0, 0.0);
        assert_eq!(y1, 8.0);
    }

    #[test]
    fn ramp_endpoints_match_stops() {
        assert_eq!(ramp_color(0.0), Color::Rgb(0, 0, 255));
        assert_eq!(ramp_color(1.0), Color::Rgb(255, 0, 0));
        assert_eq!(ramp_color(-2.0), Color::Rgb(0, 0, 255));
        assert_eq!(ramp_color(5.0), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn shade_buckets_cover_all_points() {
        let series = ScatterSeries {
            kind: PlotKind::Scatter,
            points: vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)],
            shade: Shade::Ramp(vec![0.0, 0.5, 1.0]),
            counts: None,
        };

        let buckets = shade_buckets(&series);
        let total: usize = buckets.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn uniform_shade_is_single_bucket() {
        let series = ScatterSeries {
            kind: PlotKind::Scatter,
            points: vec![(1.0, 1.0), (2.0, 1.0)],
            shade: Shade::Uniform,
            counts: None,
        };

        let buckets = shade_buckets(&series);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].1.len(), 2);
    }

    #[test]
    fn band_strip_spans_bounds() {
        let strip = band_strip(3600, 4500, 0.0);
        assert_eq!(strip.first(), Some(&(3600.0, 0.0)));
        assert_eq!(strip.last(), Some(&(4500.0, 0.0)));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
