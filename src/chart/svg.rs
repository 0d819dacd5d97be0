//! Standalone SVG serialization of a [`DensityChart`].
//!
//! The output has no scripts, fonts, or external references, so it can be
//! embedded into any HTML page or opened directly.

use std::fmt::Write;

use super::DensityChart;
use crate::color::{ChartColor, AREA_OPACITY, OUTLINE_HEX};

const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 52.0;

/// Escape text for element content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Tick step of 1, 2 or 5 × 10^k giving roughly `target` intervals.
fn nice_step(span: f64, target: f64) -> f64 {
    let raw = span / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual >= 5.0 {
        10.0
    } else if residual >= 2.0 {
        5.0
    } else if residual >= 1.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Upper bound on labelled ticks, whatever the domain looks like.
const MAX_TICKS: usize = 20;

/// Tick positions strictly inside the (un-rounded) domain.
///
/// Positions are computed as multiples of the step rather than accumulated,
/// and stop once the step falls below the float resolution at `lo`.
pub fn x_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return Vec::new();
    }
    let step = nice_step(span, 5.0);
    let first = (lo / step).ceil();
    let mut ticks: Vec<f64> = Vec::new();
    for k in 0..MAX_TICKS {
        let t = (first + k as f64) * step;
        if t > hi + step * 1e-9 || ticks.last() == Some(&t) {
            break;
        }
        ticks.push(t);
    }
    ticks
}

fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

/// Slopes for a monotone cubic through `pts` (Fritsch–Carlson, as used by
/// "monotone" area interpolation): no overshoot between samples.
fn monotone_tangents(pts: &[(f64, f64)]) -> Vec<f64> {
    let n = pts.len();
    let mut t = vec![0.0; n];
    if n < 2 {
        return t;
    }
    let secant = |i: usize| {
        let h = pts[i + 1].0 - pts[i].0;
        if h == 0.0 {
            0.0
        } else {
            (pts[i + 1].1 - pts[i].1) / h
        }
    };
    for i in 1..n - 1 {
        let h0 = pts[i].0 - pts[i - 1].0;
        let h1 = pts[i + 1].0 - pts[i].0;
        let s0 = secant(i - 1);
        let s1 = secant(i);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        t[i] = if s0 * s1 <= 0.0 {
            0.0
        } else {
            (s0.signum() + s1.signum()) * s0.abs().min(s1.abs()).min(0.5 * p.abs())
        };
    }
    if n == 2 {
        let s = secant(0);
        t[0] = s;
        t[1] = s;
    } else {
        t[0] = (3.0 * secant(0) - t[1]) / 2.0;
        t[n - 1] = (3.0 * secant(n - 2) - t[n - 2]) / 2.0;
    }
    t
}

/// Closed area path: baseline → smoothed curve → baseline.
fn area_path(pts: &[(f64, f64)], baseline: f64) -> String {
    let mut d = String::new();
    let Some(&(x0, y0)) = pts.first() else {
        return d;
    };
    let _ = write!(d, "M{x0:.2},{baseline:.2} L{x0:.2},{y0:.2}");
    let t = monotone_tangents(pts);
    for i in 0..pts.len().saturating_sub(1) {
        let (xa, ya) = pts[i];
        let (xb, yb) = pts[i + 1];
        let dx = (xb - xa) / 3.0;
        let _ = write!(
            d,
            " C{:.2},{:.2} {:.2},{:.2} {xb:.2},{yb:.2}",
            xa + dx,
            ya + dx * t[i],
            xb - dx,
            yb - dx * t[i + 1],
        );
    }
    let (xn, _) = pts[pts.len() - 1];
    let _ = write!(d, " L{xn:.2},{baseline:.2} Z");
    d
}

/// Serialize `chart` into an SVG document of the given pixel size.
pub fn to_svg(chart: &DensityChart, width: u32, height: u32) -> String {
    let w = f64::from(width);
    let h = f64::from(height);
    let plot_w = (w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (h - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let baseline = MARGIN_TOP + plot_h;
    let right = MARGIN_LEFT + plot_w;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"##
    );
    let _ = writeln!(out, r##"  <rect width="{width}" height="{height}" fill="#ffffff"/>"##);
    let _ = writeln!(
        out,
        r##"  <text x="{MARGIN_LEFT}" y="24" font-size="15" font-weight="600" fill="#222222">{}</text>"##,
        escape_xml(&chart.title)
    );

    // Areas
    if let Some((lo, hi)) = chart.x_domain {
        let y_max = chart.y_max();
        let sx = |x: f64| MARGIN_LEFT + (x - lo) / (hi - lo) * plot_w;
        let sy = |y: f64| {
            if y_max > 0.0 {
                baseline - y / y_max * plot_h
            } else {
                baseline
            }
        };
        for s in chart.series.iter().filter(|s| s.has_data()) {
            let pts: Vec<(f64, f64)> = s.points.iter().map(|p| (sx(p[0]), sy(p[1]))).collect();
            let _ = writeln!(
                out,
                r##"  <path d="{}" fill="{}" fill-opacity="{AREA_OPACITY}" stroke="{OUTLINE_HEX}" stroke-width="1"><title>{}</title></path>"##,
                area_path(&pts, baseline),
                s.color.to_hex(),
                escape_xml(&s.neighbourhood),
            );
        }

        // X ticks: labelled, at nice values inside the tight domain.
        for t in x_ticks(lo, hi) {
            let x = sx(t);
            let _ = writeln!(
                out,
                r##"  <line x1="{x:.2}" y1="{baseline:.2}" x2="{x:.2}" y2="{:.2}" stroke="#888888"/>"##,
                baseline + 5.0
            );
            let _ = writeln!(
                out,
                r##"  <text x="{x:.2}" y="{:.2}" font-size="11" text-anchor="middle" fill="#555555">{}</text>"##,
                baseline + 18.0,
                format_tick(t)
            );
        }
    }

    // Axes. The y axis carries no tick labels.
    let _ = writeln!(
        out,
        r##"  <line x1="{MARGIN_LEFT}" y1="{baseline:.2}" x2="{right:.2}" y2="{baseline:.2}" stroke="#888888"/>"##
    );
    let _ = writeln!(
        out,
        r##"  <line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline:.2}" stroke="#888888"/>"##
    );
    let _ = writeln!(
        out,
        r##"  <text x="{:.2}" y="{:.2}" font-size="12" text-anchor="middle" fill="#333333">{}</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        h - 12.0,
        escape_xml(&chart.x_label)
    );
    let y_mid = MARGIN_TOP + plot_h / 2.0;
    let _ = writeln!(
        out,
        r##"  <text x="20" y="{y_mid:.2}" font-size="12" text-anchor="middle" fill="#333333" transform="rotate(-90, 20, {y_mid:.2})">{}</text>"##,
        escape_xml(&chart.y_label)
    );

    // Legend, with a "no data" note for empty series.
    let legend_x = right + 16.0;
    for (i, s) in chart.series.iter().enumerate() {
        let y = MARGIN_TOP + 8.0 + i as f64 * 20.0;
        write_legend_entry(&mut out, legend_x, y, &s.neighbourhood, s.color);
    }
    for (i, name) in chart.empty_series().enumerate() {
        let _ = writeln!(
            out,
            r##"  <text x="{:.2}" y="{:.2}" font-size="12" fill="#b00020">No data for {}</text>"##,
            MARGIN_LEFT + 10.0,
            MARGIN_TOP + 18.0 + i as f64 * 16.0,
            escape_xml(name)
        );
    }

    out.push_str("</svg>\n");
    out
}

fn write_legend_entry(out: &mut String, x: f64, y: f64, name: &str, color: ChartColor) {
    let _ = writeln!(
        out,
        r##"  <rect x="{x:.2}" y="{:.2}" width="12" height="12" fill="{}" fill-opacity="{AREA_OPACITY}" stroke="{OUTLINE_HEX}"/>"##,
        y - 10.0,
        color.to_hex()
    );
    let _ = writeln!(
        out,
        r##"  <text x="{:.2}" y="{y:.2}" font-size="11" fill="#333333">{}</text>"##,
        x + 18.0,
        escape_xml(name)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{render, RenderOptions};
    use crate::color::{FIRST_HEX, SECOND_HEX};
    use crate::data::model::{PreparedDataset, PreparedRecord};

    fn dataset() -> PreparedDataset {
        PreparedDataset::from_records(
            [("DOWNTOWN", 4.0), ("DOWNTOWN", 6.0), ("WEST END", 5.0), ("WEST END", 9.0)]
                .into_iter()
                .map(|(n, d)| PreparedRecord::new(n.into(), d))
                .collect(),
        )
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"A&B <"x">"#), "A&amp;B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn ticks_stay_inside_tight_domain() {
        let ticks = x_ticks(9.3, 47.8);
        assert_eq!(ticks, vec![10.0, 20.0, 30.0, 40.0]);
        assert!(x_ticks(3.0, 3.0).is_empty());
    }

    #[test]
    fn ticks_terminate_on_sub_ulp_domains() {
        let lo = 100.0f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        assert!(x_ticks(lo, hi).len() <= MAX_TICKS);

        let lo = 150.0f64;
        let hi = f64::from_bits(lo.to_bits() + 2);
        assert!(x_ticks(lo, hi).len() <= MAX_TICKS);
    }

    #[test]
    fn near_equal_diameters_still_export() {
        let ds = PreparedDataset::from_records(vec![
            PreparedRecord {
                neighbourhood: "DOWNTOWN".into(),
                diameter_raw: 0.0,
                diameter_cm: 100.0,
            },
            PreparedRecord {
                neighbourhood: "WEST END".into(),
                diameter_raw: 0.0,
                diameter_cm: f64::from_bits(100.0f64.to_bits() + 1),
            },
        ]);
        let chart = render(&ds, "DOWNTOWN", "WEST END", &RenderOptions::default());
        let svg = chart.to_svg(720, 420);
        assert!(svg.contains("<text"));
        assert_eq!(svg.matches("<path ").count(), 2);
    }

    #[test]
    fn monotone_tangents_do_not_overshoot_flat_runs() {
        let t = monotone_tangents(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]);
        assert_eq!(t[1], 0.0);
        assert_eq!(t[2], 0.0);
    }

    #[test]
    fn document_is_self_contained_and_coloured_by_selection() {
        let chart = render(&dataset(), "DOWNTOWN", "WEST END", &RenderOptions::default());
        let svg = chart.to_svg(720, 420);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Cherry tree diameter distribution"));
        assert!(svg.contains("Tree diameter (cm)"));
        assert!(svg.contains(FIRST_HEX));
        assert!(svg.contains(SECOND_HEX));
        assert!(svg.contains("fill-opacity=\"0.4\""));
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(!svg.contains("href"));
        assert!(!svg.contains("<script"));
    }

    #[test]
    fn empty_series_is_called_out() {
        let chart = render(&dataset(), "DOWNTOWN", "ATLANTIS & CO", &RenderOptions::default());
        let svg = chart.to_svg(720, 420);
        assert!(svg.contains("No data for ATLANTIS &amp; CO"));
        assert_eq!(svg.matches("<path ").count(), 1);
    }
}
