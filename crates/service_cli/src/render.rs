//! Text and JSON rendering of a risk report.

use risk_core::math::statistics::{mean, sample_std_dev};
use risk_engine::{as_percent, RiskReport};
use std::fmt::Write;

/// Output format for `analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn tables
    #[default]
    Table,
    /// Pretty-printed JSON of the whole report
    Json,
}

/// Renders the report as JSON.
pub fn render_json(report: &RiskReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Renders the report as text tables.
pub fn render_table(report: &RiskReport) -> String {
    let mut out = String::new();
    let ids: Vec<String> = report.prices.instruments().iter().map(ToString::to_string).collect();

    let _ = writeln!(out, "Risk report: {}", report.selection);
    let _ = writeln!(
        out,
        "Window {}, {} price rows, {} return rows",
        report.window,
        report.prices.row_count(),
        report.returns.row_count()
    );
    if let Some((first, last)) = report.prices.date_range() {
        let _ = writeln!(out, "Prices from {} to {}", first, last);
    }

    let _ = writeln!(out, "\nHistorical prices");
    let rows: Vec<Vec<String>> = report
        .prices
        .iter_columns()
        .map(|(id, column)| {
            let (min, max) = min_max(column);
            vec![
                id.to_string(),
                format!("{:.2}", column.first().copied().unwrap_or(f64::NAN)),
                format!("{:.2}", column.last().copied().unwrap_or(f64::NAN)),
                format!("{:.2}", min),
                format!("{:.2}", max),
            ]
        })
        .collect();
    out.push_str(&table(&["Instrument", "First", "Last", "Min", "Max"], &rows));

    let _ = writeln!(out, "\nDaily returns (%)");
    let rows: Vec<Vec<String>> = report
        .returns
        .iter_columns()
        .map(|(id, column)| {
            let (min, max) = min_max(column);
            vec![
                id.to_string(),
                percent(mean(column).unwrap_or(0.0)),
                percent(sample_std_dev(column).unwrap_or(0.0)),
                percent(min),
                percent(max),
            ]
        })
        .collect();
    out.push_str(&table(&["Instrument", "Mean", "Std dev", "Min", "Max"], &rows));

    let _ = writeln!(out, "\nRisk indicators");
    let var_header = format!("VaR {}% (1d)", confidence_label(report.var.confidence()));
    let rows: Vec<Vec<String>> = report
        .volatility
        .by_instrument()
        .iter()
        .map(|(id, vol)| {
            vec![
                id.to_string(),
                percent(vol),
                report.var.get(id).map(percent).unwrap_or_default(),
            ]
        })
        .collect();
    out.push_str(&table(&["Instrument", "Volatility (ann.)", var_header.as_str()], &rows));

    let _ = writeln!(out, "\nCorrelation matrix");
    let mut headers: Vec<&str> = vec![""];
    headers.extend(ids.iter().map(String::as_str));
    let rows: Vec<Vec<String>> = report
        .correlation
        .rows()
        .zip(&ids)
        .map(|(row, id)| {
            std::iter::once(id.clone())
                .chain(row.iter().map(|rho| format!("{:.3}", rho)))
                .collect()
        })
        .collect();
    out.push_str(&table(&headers, &rows));

    out
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", as_percent(fraction))
}

/// Confidence as a short percentage: 0.95 -> "95", 0.975 -> "97.5".
fn confidence_label(confidence: f64) -> String {
    let fixed = format!("{:.2}", as_percent(confidence));
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)))
}

/// Box-drawn table; the first column is left-aligned, the rest right-aligned.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&table_line(headers.iter().copied(), &widths));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        out.push_str(&table_line(row.iter().map(String::as_str), &widths));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let rendered: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!(" {:<w$} ", cell, w = w)
            } else {
                format!(" {:>w$} ", cell, w = w)
            }
        })
        .collect();
    format!("│{}│\n", rendered.join("│"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_prices::InMemoryHistory;
    use risk_core::{Date, InstrumentSet};
    use risk_engine::{RiskConfig, RiskPipeline};

    fn report() -> RiskReport {
        let d = |day| Date::from_ymd(2024, 1, day).unwrap();
        let source = InMemoryHistory::new()
            .with_series("A", vec![(d(2), 100.0), (d(3), 110.0), (d(4), 99.0)])
            .with_series("B", vec![(d(2), 50.0), (d(3), 50.0), (d(4), 50.0)]);
        let pipeline = RiskPipeline::from_source(source, RiskConfig::default()).unwrap();
        let selection: InstrumentSet = ["A", "B"].into_iter().collect();
        pipeline.try_run(&selection, d(10)).unwrap()
    }

    #[test]
    fn test_table_contains_indicators() {
        let text = render_table(&report());

        assert!(text.contains("Risk report: A, B"));
        assert!(text.contains("224.50%"));
        assert!(text.contains("23.26%"));
        assert!(text.contains("VaR 95% (1d)"));
        assert!(text.contains("1.000"));
        assert!(text.contains("0.000"));
    }

    #[test]
    fn test_confidence_label_has_no_float_noise() {
        assert_eq!(confidence_label(0.95), "95");
        assert_eq!(confidence_label(0.57), "57");
        assert_eq!(confidence_label(0.975), "97.5");
        assert_eq!(confidence_label(0.999), "99.9");
    }

    #[test]
    fn test_table_header_for_odd_confidence() {
        let d = |day| Date::from_ymd(2024, 1, day).unwrap();
        let source = InMemoryHistory::new()
            .with_series("A", vec![(d(2), 100.0), (d(3), 110.0), (d(4), 99.0)]);
        let config = RiskConfig {
            confidence_level: 0.57,
            ..RiskConfig::default()
        };
        let pipeline = RiskPipeline::from_source(source, config).unwrap();
        let selection: InstrumentSet = ["A"].into_iter().collect();
        let text = render_table(&pipeline.try_run(&selection, d(10)).unwrap());

        assert!(text.contains("VaR 57% (1d)"), "{}", text);
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let text = table(&["Id", "Value"], &[vec!["long-name".into(), "1".into()]]);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_json_round_trips_through_serde_json() {
        let json = render_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["selection"]["ids"][0], "A");
        assert_eq!(value["var"]["confidence"], 0.95);
        assert!(value["correlation"]["values"].is_array());
    }
}
