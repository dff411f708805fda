//! Builders for each kind of report.

use std::path::Path;

use tracing::debug;
use tracing::info;

use super::annotate::{add_percentages, column_messages, set_notes_and_status, threshold_messages};
use super::column::Column;
use super::merge::outer_join;
use super::table::Report;
use super::{SampleMetricsRow, SummaryOptions, Warning};
use crate::alignment::{parse_alignment_stats, Pipeline};
use crate::errors::Result;
use crate::fastqc;

/// Builds a report from FASTQC results alone.
///
/// The FASTQC total sequence count is reported as the sample's total reads,
/// and only the total reads threshold applies. A sample's notes hold the
/// threshold message (if any) followed by its FASTQC messages.
pub fn fastqc_report(results_dir: &Path, options: &SummaryOptions) -> Result<Report> {
    let (records, warnings) = fastqc::collect(results_dir, &options.labels_of_interest)?;

    let (rows, messages): (Vec<SampleMetricsRow>, Vec<Vec<String>>) = records
        .into_iter()
        .map(|record| {
            let mut row = SampleMetricsRow::new(record.sample_name);
            row.total_reads = record.total_sequences;
            (row, record.messages)
        })
        .unzip();

    let threshold = match options.thresholds.total_reads {
        Some(t) => column_messages(&rows, Column::TotalReads, t, options.threshold_scope),
        None => vec![String::new(); rows.len()],
    };

    let rows = rows
        .into_iter()
        .zip(threshold)
        .zip(messages)
        .map(|((mut row, threshold), messages)| {
            set_notes_and_status(
                &mut row,
                std::iter::once(threshold).chain(messages.iter().cloned()),
                &options.status_marker,
            );
            row.fastqc_messages = messages;
            row
        })
        .collect();

    info!("Built FASTQC report from {}.", results_dir.display());
    Ok(Report::new(Column::FASTQC, rows, warnings))
}

/// Builds a report from one pipeline's alignment statistics alone. Every
/// configured threshold applies.
pub fn alignment_report(
    pipeline: Pipeline,
    output_dir: &Path,
    options: &SummaryOptions,
) -> Result<Report> {
    let (mut rows, warnings) = parse_alignment_stats(pipeline, output_dir)?;

    add_percentages(&mut rows);
    let messages = threshold_messages(
        &rows,
        &options.thresholds.checks(),
        options.threshold_scope,
    );
    for (row, messages) in rows.iter_mut().zip(messages) {
        set_notes_and_status(row, messages, &options.status_marker);
    }

    info!(
        "Built {} alignment report from {}.",
        pipeline,
        output_dir.display()
    );
    Ok(Report::new(Column::ALIGNMENT, rows, warnings))
}

/// Builds the combined report: FASTQC results outer-joined with one
/// pipeline's alignment statistics on the sample name.
///
/// A sample missing from either input still gets a row, with the other
/// input's metrics left unavailable. If the join does not produce exactly one
/// row per FASTQC sample, a [`Warning::MergeMismatch`] is recorded. A
/// sample's notes hold its FASTQC messages followed by any threshold
/// messages.
pub fn combined_report(
    pipeline: Pipeline,
    output_dir: &Path,
    fastqc_dir: &Path,
    options: &SummaryOptions,
) -> Result<Report> {
    let (records, mut warnings) = fastqc::collect(fastqc_dir, &options.labels_of_interest)?;
    let (alignments, alignment_warnings) = parse_alignment_stats(pipeline, output_dir)?;
    warnings.extend(alignment_warnings);

    let expected = records.len();
    let joined = outer_join(records, alignments);
    warnings.extend(joined.warnings);

    let mut rows: Vec<SampleMetricsRow> = joined
        .rows
        .into_iter()
        .map(|joined| {
            let mut row = joined
                .right
                .unwrap_or_else(|| SampleMetricsRow::new(joined.sample_name.clone()));

            if let Some(record) = joined.left {
                row.fastqc_total_reads = record.total_sequences;
                row.fastqc_messages = record.messages;
            }

            row
        })
        .collect();

    debug!("  [*] Merged rows: {}", rows.len());
    debug!("  [*] FASTQC rows: {}", expected);
    if rows.len() != expected {
        warnings.push(Warning::merge_mismatch(rows.len(), expected));
    }

    add_percentages(&mut rows);
    let messages = threshold_messages(
        &rows,
        &options.thresholds.checks(),
        options.threshold_scope,
    );
    for (row, messages) in rows.iter_mut().zip(messages) {
        let notes = row.fastqc_messages.iter().cloned().chain(messages).collect::<Vec<_>>();
        set_notes_and_status(row, notes, &options.status_marker);
    }

    info!(
        "Built combined report from {} and {}.",
        fastqc_dir.display(),
        output_dir.display()
    );
    Ok(Report::new(Column::COMBINED, rows, warnings))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::alignment::star::LOG_FINAL_OUT;
    use crate::fastqc::scan::tests::{fastqc_data, summary, write_result_dir};
    use crate::report::{Metric, ThresholdScope, Thresholds, DEFAULT_STATUS_MARKER};

    fn star_log(total: u64, unique: u64) -> String {
        format!(
            "          Number of input reads |\t{}\n\
             Uniquely mapped reads number |\t{}\n\
             Uniquely mapped reads % |\t0.00%\n",
            total, unique
        )
    }

    fn write_star_sample(root: &Path, sample: &str, total: u64, unique: u64) {
        let dir = root.join(sample);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LOG_FINAL_OUT), star_log(total, unique)).unwrap();
    }

    fn options(thresholds: Thresholds) -> SummaryOptions {
        SummaryOptions::new(
            vec![String::from("Per tile sequence quality")],
            thresholds,
            ThresholdScope::Row,
            DEFAULT_STATUS_MARKER,
        )
    }

    #[test]
    fn test_alignment_report_star_round_trip() {
        let out = tempfile::tempdir().unwrap();
        write_star_sample(out.path(), "testSample", 32_389_200, 28_693_280);

        let report =
            alignment_report(Pipeline::StarHtseq, out.path(), &options(Thresholds::default()))
                .unwrap();
        let row = report.get("testSample").unwrap();

        assert_eq!(row.total_reads, Metric::Value(32_389_200.0));
        assert_eq!(row.uniquely_aligned_reads, Metric::Value(28_693_280.0));
        assert_eq!(row.aligned_reads, Metric::Unavailable);
        assert_eq!(row.fastqc_total_reads, Metric::Unavailable);
        assert_eq!(row.percent_aligned, Metric::Unavailable);
        assert!(row.notes.is_empty());
        assert!(row.status.is_empty());
    }

    #[test]
    fn test_alignment_report_threshold_messages() {
        let out = tempfile::tempdir().unwrap();
        write_star_sample(out.path(), "a", 5, 5);
        write_star_sample(out.path(), "b", 10, 5);

        let thresholds = Thresholds {
            total_reads: Some(10.0),
            ..Default::default()
        };
        let report = alignment_report(Pipeline::StarHtseq, out.path(), &options(thresholds))
            .unwrap();

        assert_eq!(report.get("a").unwrap().notes, "Below Total Reads threshold");
        assert_eq!(report.get("a").unwrap().status, "CHECK");
        assert_eq!(report.get("b").unwrap().notes, "");
        assert_eq!(report.get("b").unwrap().status, "");
    }

    #[test]
    fn test_fastqc_report_notes_order() {
        let fq = tempfile::tempdir().unwrap();
        write_result_dir(
            fq.path(),
            "ARH1_S1",
            &fastqc_data("ARH1_S1", 5),
            &summary("ARH1_S1", &[("FAIL", "Per tile sequence quality")]),
        );

        let thresholds = Thresholds {
            total_reads: Some(10.0),
            ..Default::default()
        };
        let report = fastqc_report(fq.path(), &options(thresholds)).unwrap();

        assert_eq!(report.columns(), Column::FASTQC);
        let row = report.get("ARH1_S1").unwrap();
        assert_eq!(row.total_reads, Metric::Value(5.0));
        assert_eq!(
            row.notes,
            "Below Total Reads threshold, FAIL: Per tile sequence quality"
        );
        assert_eq!(row.status, "CHECK");
    }

    #[test]
    fn test_combined_report_outer_join() {
        let fq = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        write_result_dir(
            fq.path(),
            "a",
            &fastqc_data("a", 100),
            &summary("a", &[("WARN", "Per tile sequence quality")]),
        );
        write_result_dir(fq.path(), "b", &fastqc_data("b", 200), "");
        write_star_sample(out.path(), "b", 200, 150);
        write_star_sample(out.path(), "c", 300, 30);

        let thresholds = Thresholds {
            percent_unique_aligned: Some(50.0),
            ..Default::default()
        };
        let report = combined_report(Pipeline::StarHtseq, out.path(), fq.path(), &options(thresholds))
            .unwrap();

        assert_eq!(report.columns(), Column::COMBINED);
        let names: Vec<&str> = report.rows().iter().map(|r| r.sample_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let a = report.get("a").unwrap();
        assert_eq!(a.fastqc_total_reads, Metric::Value(100.0));
        assert_eq!(a.total_reads, Metric::Unavailable);
        assert_eq!(a.percent_unique_aligned, Metric::Unavailable);
        assert_eq!(a.notes, "WARN: Per tile sequence quality");
        assert_eq!(a.status, "CHECK");

        let b = report.get("b").unwrap();
        assert_eq!(b.fastqc_total_reads, Metric::Value(200.0));
        assert_eq!(b.total_reads, Metric::Value(200.0));
        assert_eq!(b.percent_unique_aligned, Metric::Value(75.0));
        assert_eq!(b.notes, "");

        let c = report.get("c").unwrap();
        assert_eq!(c.fastqc_total_reads, Metric::Unavailable);
        assert_eq!(c.percent_unique_aligned, Metric::Value(10.0));
        assert_eq!(c.notes, "Below Percent Uniquely Aligned threshold");

        assert_eq!(report.warnings(), &[Warning::MergeMismatch { merged: 3, expected: 2 }]);
    }

    #[test]
    fn test_combined_report_column_scope_skips_thresholds() {
        let fq = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        write_result_dir(fq.path(), "a", &fastqc_data("a", 100), "");
        write_result_dir(fq.path(), "b", &fastqc_data("b", 100), "");
        write_star_sample(out.path(), "a", 100, 10);

        let mut options = options(Thresholds {
            total_reads: Some(1000.0),
            ..Default::default()
        });
        options.threshold_scope = ThresholdScope::Column;

        let report =
            combined_report(Pipeline::StarHtseq, out.path(), fq.path(), &options).unwrap();
        assert!(report.rows().iter().all(|r| r.notes.is_empty()));
        assert!(report.warnings().is_empty());

        options.threshold_scope = ThresholdScope::Row;
        let report =
            combined_report(Pipeline::StarHtseq, out.path(), fq.path(), &options).unwrap();
        assert_eq!(report.get("a").unwrap().notes, "Below Total Reads threshold");
        assert_eq!(report.get("b").unwrap().notes, "");
    }

    #[test]
    fn test_combined_report_empty_inputs() {
        let fq = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let report = combined_report(
            Pipeline::Kallisto,
            out.path(),
            fq.path(),
            &options(Thresholds::default()),
        )
        .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.warnings().len(), 2);
    }
}
