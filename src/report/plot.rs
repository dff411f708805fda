//! Bar plot of read counts per sample.

use std::path::Path;

use anyhow::bail;
use itertools::Itertools;
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, BarMode};
use plotly::{Bar, Layout, Scatter};
use tracing::info;

use super::Report;

/// The name of the aligned reads plot.
pub const ALIGNED_READS_PLOT_NAME: &str = "Number of Reads";

/// Generates a grouped bar plot of total reads and uniquely aligned reads for
/// each sample in the report. If a total reads threshold is provided, it is
/// drawn as a horizontal red line across all samples.
pub fn aligned_reads_plot(
    report: &Report,
    total_reads_threshold: Option<f64>,
) -> anyhow::Result<plotly::Plot> {
    if report.is_empty() {
        bail!("cannot plot a report with no samples");
    }

    let mut plot = plotly::Plot::new();

    // (1) The sample names make up the x-axis for every trace. Unavailable
    // values are left as gaps rather than plotted as zero.
    let samples = report
        .rows()
        .iter()
        .map(|r| r.sample_name.clone())
        .collect_vec();
    let total_reads = report
        .rows()
        .iter()
        .map(|r| r.total_reads.value())
        .collect_vec();
    let uniquely_aligned_reads = report
        .rows()
        .iter()
        .map(|r| r.uniquely_aligned_reads.value())
        .collect_vec();

    plot.add_trace(Bar::new(samples.clone(), total_reads).name("Total Reads"));
    plot.add_trace(
        Bar::new(samples.clone(), uniquely_aligned_reads).name("Uniquely Aligned Reads"),
    );

    // (2) Reference line for the minimum number of reads.
    if let Some(threshold) = total_reads_threshold {
        let y = vec![threshold; samples.len()];
        plot.add_trace(
            Scatter::new(samples, y)
                .mode(Mode::Lines)
                .name("Total Reads Threshold")
                .line(Line::new().color("red").width(2.0)),
        );
    }

    let layout = Layout::new()
        .title(Title::new(ALIGNED_READS_PLOT_NAME))
        .bar_mode(BarMode::Group)
        .x_axis(Axis::new().title(Title::new("Sample")))
        .y_axis(
            Axis::new()
                .title(Title::new("Number of Reads"))
                .auto_range(true),
        );
    plot.set_layout(layout);

    Ok(plot)
}

/// Generates the aligned reads plot and writes it as a standalone HTML file.
pub fn write_aligned_reads_plot(
    report: &Report,
    total_reads_threshold: Option<f64>,
    path: &Path,
) -> anyhow::Result<()> {
    let plot = aligned_reads_plot(report, total_reads_threshold)?;
    info!(
        "  [*] Writing {} plot to {}",
        ALIGNED_READS_PLOT_NAME,
        path.display()
    );
    plot.write_html(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Column, Metric, SampleMetricsRow};

    #[test]
    fn test_empty_report_cannot_be_plotted() {
        let report = Report::new(Column::ALIGNMENT, Vec::new(), Vec::new());
        assert!(aligned_reads_plot(&report, None).is_err());
    }

    #[test]
    fn test_plot_includes_threshold_line() {
        let mut row = SampleMetricsRow::new("testSample");
        row.total_reads = Metric::Value(32_389_200.0);
        row.uniquely_aligned_reads = Metric::Value(28_693_280.0);
        let report = Report::new(Column::ALIGNMENT, vec![row], Vec::new());

        let html = aligned_reads_plot(&report, Some(10_000_000.0))
            .unwrap()
            .to_html();
        assert!(html.contains("testSample"));
        assert!(html.contains("Total Reads Threshold"));
    }
}
