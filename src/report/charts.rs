//! Inline SVG charts, so the report needs nothing from the network.

use std::f64::consts::PI;
use std::fmt::{Result, Write};

use crate::types::MonthlyBucket;

const OPEN_COLOR: &str = "#1a7f37";
const CLOSED_COLOR: &str = "#8250df";
const EMPTY_COLOR: &str = "#d0d7de";

const TREND_WIDTH: f64 = 720.0;
const TREND_HEIGHT: f64 = 260.0;
const PAD_LEFT: f64 = 40.0;
const PAD_RIGHT: f64 = 10.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 30.0;

/// Donut of open vs closed.
pub fn write_distribution_chart<W: Write>(writer: &mut W, open: usize, closed: usize) -> Result {
    let radius = 70.0;
    let circumference = 2.0 * PI * radius;
    let total = open + closed;

    writeln!(
        writer,
        "      <svg class=\"chart distribution-chart\" viewBox=\"0 0 200 200\" role=\"img\" aria-label=\"{open} open, {closed} closed\">"
    )?;

    if total == 0 {
        writeln!(
            writer,
            "        <circle cx=\"100\" cy=\"100\" r=\"{radius}\" fill=\"none\" stroke=\"{EMPTY_COLOR}\" stroke-width=\"28\"/>"
        )?;
    } else {
        let open_len = circumference * open as f64 / total as f64;
        let closed_len = circumference - open_len;
        // Arcs start at 12 o'clock and run clockwise: open, then closed.
        writeln!(writer, "        <g transform=\"rotate(-90 100 100)\">")?;
        writeln!(
            writer,
            "          <circle cx=\"100\" cy=\"100\" r=\"{radius}\" fill=\"none\" stroke=\"{OPEN_COLOR}\" stroke-width=\"28\" stroke-dasharray=\"{open_len:.2} {circumference:.2}\"><title>Open: {open}</title></circle>"
        )?;
        writeln!(
            writer,
            "          <circle cx=\"100\" cy=\"100\" r=\"{radius}\" fill=\"none\" stroke=\"{CLOSED_COLOR}\" stroke-width=\"28\" stroke-dasharray=\"{closed_len:.2} {circumference:.2}\" stroke-dashoffset=\"{:.2}\"><title>Closed: {closed}</title></circle>",
            -open_len
        )?;
        writeln!(writer, "        </g>")?;
    }

    writeln!(
        writer,
        "        <text x=\"100\" y=\"108\" text-anchor=\"middle\" class=\"chart-center\">{total}</text>"
    )?;
    writeln!(writer, "      </svg>")?;
    write_legend(writer)?;
    Ok(())
}

/// Stacked bars per month, closed below open.
pub fn write_trend_chart<W: Write>(writer: &mut W, months: &[MonthlyBucket]) -> Result {
    let max = months.iter().map(MonthlyBucket::total).max().unwrap_or(0).max(1);
    let step = max.div_ceil(4);
    let top = step * 4;

    let plot_width = TREND_WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_height = TREND_HEIGHT - PAD_TOP - PAD_BOTTOM;
    let baseline = PAD_TOP + plot_height;
    let slot = plot_width / months.len().max(1) as f64;
    let bar_width = slot * 0.6;
    let scale = |count: usize| plot_height * count as f64 / top as f64;

    writeln!(
        writer,
        "      <svg class=\"chart trend-chart\" viewBox=\"0 0 {TREND_WIDTH} {TREND_HEIGHT}\" role=\"img\" aria-label=\"Issues created per month\">"
    )?;

    for tick in (0..=top).step_by(step) {
        let y = baseline - scale(tick);
        writeln!(
            writer,
            "        <line class=\"grid\" x1=\"{PAD_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\"/>",
            TREND_WIDTH - PAD_RIGHT
        )?;
        writeln!(
            writer,
            "        <text class=\"axis\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{tick}</text>",
            PAD_LEFT - 6.0,
            y + 4.0
        )?;
    }

    for (i, bucket) in months.iter().enumerate() {
        let x = PAD_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
        let closed_height = scale(bucket.closed);
        let open_height = scale(bucket.open);
        let label = bucket.label();

        writeln!(writer, "        <g class=\"bar\">")?;
        writeln!(
            writer,
            "          <title>{label}: {} open, {} closed</title>",
            bucket.open, bucket.closed
        )?;
        if bucket.closed > 0 {
            writeln!(
                writer,
                "          <rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_width:.1}\" height=\"{closed_height:.1}\" fill=\"{CLOSED_COLOR}\"/>",
                baseline - closed_height
            )?;
        }
        if bucket.open > 0 {
            writeln!(
                writer,
                "          <rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_width:.1}\" height=\"{open_height:.1}\" fill=\"{OPEN_COLOR}\"/>",
                baseline - closed_height - open_height
            )?;
        }
        writeln!(
            writer,
            "          <text class=\"axis\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{label}</text>",
            x + bar_width / 2.0,
            TREND_HEIGHT - 10.0
        )?;
        writeln!(writer, "        </g>")?;
    }

    writeln!(writer, "      </svg>")?;
    write_legend(writer)?;
    Ok(())
}

fn write_legend<W: Write>(writer: &mut W) -> Result {
    writeln!(
        writer,
        "      <div class=\"legend\"><span class=\"swatch\" style=\"background:{OPEN_COLOR}\"></span>Open <span class=\"swatch\" style=\"background:{CLOSED_COLOR}\"></span>Closed</div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(counts: &[(usize, usize)]) -> Vec<MonthlyBucket> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &(open, closed))| MonthlyBucket {
                year: 2026,
                month: i as u32 + 1,
                open,
                closed,
            })
            .collect()
    }

    #[test]
    fn test_trend_chart_has_group_per_month() {
        let mut out = String::new();
        write_trend_chart(&mut out, &months(&[(0, 0); 12])).unwrap();
        assert_eq!(out.matches("<g class=\"bar\">").count(), 12);
        assert!(out.contains("2026-01: 0 open, 0 closed"));
        assert!(!out.contains("<rect"));
    }

    #[test]
    fn test_trend_chart_draws_stacked_bars() {
        let mut out = String::new();
        write_trend_chart(&mut out, &months(&[(2, 1), (0, 4)])).unwrap();
        assert_eq!(out.matches("<rect").count(), 3);
        assert!(out.contains("2026-02: 0 open, 4 closed"));
    }

    #[test]
    fn test_distribution_chart_empty() {
        let mut out = String::new();
        write_distribution_chart(&mut out, 0, 0).unwrap();
        assert!(out.contains(EMPTY_COLOR));
        assert!(out.contains(">0</text>"));
    }

    #[test]
    fn test_distribution_chart_arcs() {
        let mut out = String::new();
        write_distribution_chart(&mut out, 3, 1).unwrap();
        assert!(out.contains("Open: 3"));
        assert!(out.contains("Closed: 1"));
        assert!(out.contains(">4</text>"));
    }
}
