//! The final report table: pruning and rendering.

use std::fmt;
use std::io::Write;

use itertools::Itertools;
use prettytable::Cell as PrettyCell;
use prettytable::Row as PrettyRow;
use prettytable::Table;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

use super::column::{Cell, Column};
use super::metric::Metric;
use super::{SampleMetricsRow, Warning};
use crate::utils::display::{CountFormat, PercentageFormat};

/// The formats a [`Report`] can be written in.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A human-readable table.
    #[default]
    Table,

    /// Tab-separated values with a header line.
    Tsv,

    /// A JSON array with one object per sample.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Tsv => write!(f, "tsv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A per-sample report with a fixed column order.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    columns: Vec<Column>,
    rows: Vec<SampleMetricsRow>,
    warnings: Vec<Warning>,
}

impl Report {
    /// Creates a new [`Report`].
    pub fn new(columns: &[Column], rows: Vec<SampleMetricsRow>, warnings: Vec<Warning>) -> Self {
        Report {
            columns: columns.to_vec(),
            rows,
            warnings,
        }
    }

    /// The columns of this report, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows of this report, ordered by sample name.
    pub fn rows(&self) -> &[SampleMetricsRow] {
        &self.rows
    }

    /// Any anomalies encountered while building this report.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Whether or not the report has any rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the row for a sample, if there is one.
    pub fn get(&self, sample_name: &str) -> Option<&SampleMetricsRow> {
        self.rows.iter().find(|r| r.sample_name == sample_name)
    }

    /// Gets every cell in a column.
    pub fn column_cells(&self, column: Column) -> Vec<Cell<'_>> {
        self.rows.iter().map(|r| column.cell(r)).collect()
    }

    /// Drops every column in which all values are unavailable. Columns with
    /// at least one real value, and all rows, are kept.
    pub fn prune_unavailable(&self) -> Report {
        let columns = self
            .columns
            .iter()
            .filter(|column| !self.is_entirely_unavailable(**column))
            .copied()
            .collect();

        Report {
            columns,
            rows: self.rows.clone(),
            warnings: self.warnings.clone(),
        }
    }

    fn is_entirely_unavailable(&self, column: Column) -> bool {
        !self.rows.is_empty()
            && self
                .column_cells(column)
                .iter()
                .all(|cell| *cell == Cell::Metric(Metric::Unavailable))
    }

    /// Renders the report as a human-readable table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(PrettyRow::new(
            self.columns
                .iter()
                .map(|c| PrettyCell::new(c.name()))
                .collect(),
        ));

        for row in &self.rows {
            let cells = self
                .columns
                .iter()
                .map(|column| {
                    let rendered = match column.cell(row) {
                        Cell::Text(s) => s.to_string(),
                        Cell::Metric(m) if column.is_percentage() => {
                            PercentageFormat(m).to_string()
                        }
                        Cell::Metric(m) => CountFormat(m).to_string(),
                    };
                    PrettyCell::new(&rendered)
                })
                .collect();
            table.add_row(PrettyRow::new(cells));
        }

        table
    }

    /// Writes the report as tab-separated values.
    pub fn write_tsv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        writer.write_record(self.columns.iter().map(|c| c.name()))?;
        for row in &self.rows {
            writer.write_record(self.columns.iter().map(|c| c.cell(row).to_string()))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let rows = self
            .rows
            .iter()
            .map(|row| JsonRow {
                columns: &self.columns,
                row,
            })
            .collect_vec();
        serde_json::to_string_pretty(&rows)
    }

    /// Writes the report in the requested format.
    pub fn write<W: Write>(&self, format: OutputFormat, mut writer: W) -> anyhow::Result<()> {
        match format {
            OutputFormat::Table => {
                self.to_table().print(&mut writer)?;
            }
            OutputFormat::Tsv => self.write_tsv(writer)?,
            OutputFormat::Json => writeln!(writer, "{}", self.to_json()?)?,
        }

        Ok(())
    }
}

struct JsonRow<'a> {
    columns: &'a [Column],
    row: &'a SampleMetricsRow,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            map.serialize_entry(column.name(), &column.cell(self.row))?;
        }
        map.end()
    }
}
