use super::views::{PriorScope, ReportBlock, ReportColumn, ReportPeriod, ReportRow, SequenceReport};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of empty cells between a preamble label and its value.
const PREAMBLE_PADDING: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ReportWriteError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode report CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("report CSV was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders a [`SequenceReport`] in the comma-separated layout the downstream spreadsheets read.
pub struct SequenceReportDocument<'a> {
    report: &'a SequenceReport,
    institution: &'a str,
}

impl<'a> SequenceReportDocument<'a> {
    pub fn new(report: &'a SequenceReport, institution: &'a str) -> Self {
        Self {
            report,
            institution,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "Sequence_{}_{}.csv",
            self.report.first_course, self.report.second_course
        )
    }

    pub fn render(&self) -> Result<String, ReportWriteError> {
        let bytes = self.render_to(Vec::new())?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn render_to<W: Write>(&self, output: W) -> Result<W, ReportWriteError> {
        let mut doc = CsvDocument::new(output);
        self.write_preamble(&mut doc)?;
        for block in &self.report.blocks {
            self.write_block(&mut doc, block)?;
        }
        doc.finish()
    }

    /// Writes the report into `dir`, creating the directory if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportWriteError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let file = std::fs::File::create(&path)?;
        let mut file = self.render_to(std::io::BufWriter::new(file))?;
        file.flush()?;
        debug!(path = %path.display(), "sequence report written");
        Ok(path)
    }

    fn write_preamble<W: Write>(&self, doc: &mut CsvDocument<W>) -> Result<(), ReportWriteError> {
        let report = self.report;
        let first = report.first_course.as_str();
        let second = report.second_course.as_str();
        let counts = report.counts;

        doc.labelled("Pass rates in:", second)?;
        doc.labelled("As function of:", first)?;
        doc.labelled(
            &format!("Total students with {second}:"),
            &counts.with_second.to_string(),
        )?;
        doc.labelled(
            &format!("Subset with {first} in prior term:"),
            &counts.with_first_prior.to_string(),
        )?;
        doc.labelled(
            &format!("Subset with {first} in any earlier term:"),
            &counts.with_first_any.to_string(),
        )?;
        doc.blank()
    }

    fn write_block<W: Write>(
        &self,
        doc: &mut CsvDocument<W>,
        block: &ReportBlock,
    ) -> Result<(), ReportWriteError> {
        doc.line([block_title(&self.report.first_course, block)])?;
        doc.blank()?;

        if !block.rows.is_empty() {
            doc.line(self.block_heading())?;
            doc.line(count_rate_grade_header())?;
            doc.line(self.column_label_header())?;
        }

        for row in &block.rows {
            doc.line(row_fields(row))?;
        }

        doc.blank()
    }

    fn block_heading(&self) -> Vec<String> {
        let mut fields = vec![String::new()];
        for (position, column) in ReportColumn::ordered().into_iter().enumerate() {
            if position > 0 {
                fields.extend([String::new(), String::new()]);
            }
            fields.push(column.heading(&self.report.first_course, self.institution));
        }
        fields
    }

    fn column_label_header(&self) -> Vec<String> {
        let mut fields = vec!["Year".to_string()];
        for column in ReportColumn::ordered() {
            let label = column.label(self.institution);
            fields.extend([String::new(), label.clone(), label]);
        }
        fields
    }
}

fn block_title(first_course: &str, block: &ReportBlock) -> String {
    match (block.period, block.scope) {
        (ReportPeriod::OneYear, PriorScope::PriorTerm) => format!(
            "Reports for individual years [students with credit in {first_course} in the prior term]"
        ),
        (ReportPeriod::ThreeYear, PriorScope::PriorTerm) => format!(
            "Reports based on average over last three terms [students with credit in {first_course} in the prior term]"
        ),
        // Existing spreadsheets key on this exact wording.
        (ReportPeriod::OneYear, PriorScope::AnyEarlierTerm) => format!(
            "Reports for individual years [students with credit in {first_course} in the any earlier term]"
        ),
        (ReportPeriod::ThreeYear, PriorScope::AnyEarlierTerm) => format!(
            "Reports based on average over last three terms [students with credit in {first_course} in any earlier term]"
        ),
    }
}

fn count_rate_grade_header() -> Vec<&'static str> {
    let mut fields = vec![""];
    for _ in ReportColumn::ordered() {
        fields.extend(["N", "Pass %", "Avg. Grade"]);
    }
    fields
}

fn row_fields(row: &ReportRow) -> Vec<String> {
    let mut fields = vec![row.label.clone()];
    if let Some(columns) = &row.columns {
        for stats in columns {
            fields.push(stats.count.to_string());
            fields.push(format_decimal(stats.pass_rate));
            fields.push(format_decimal(stats.average_grade));
        }
    }
    fields
}

/// Two decimal places; absent and non-finite values render as an empty cell.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.2}"),
        _ => String::new(),
    }
}

/// Line-oriented CSV output. Each line is encoded independently so rows may differ in width
/// and blank separator lines can be written verbatim.
struct CsvDocument<W: Write> {
    output: W,
}

impl<W: Write> CsvDocument<W> {
    fn new(output: W) -> Self {
        Self { output }
    }

    fn line<I, T>(&mut self, fields: I) -> Result<(), ReportWriteError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut self.output);
        writer.write_record(fields)?;
        writer.flush()?;
        Ok(())
    }

    fn labelled(&mut self, label: &str, value: &str) -> Result<(), ReportWriteError> {
        let padding = std::iter::repeat("").take(PREAMBLE_PADDING);
        self.line(std::iter::once(label).chain(padding).chain(std::iter::once(value)))
    }

    /// The csv encoder writes an empty record as `""`, so blank lines bypass it.
    fn blank(&mut self) -> Result<(), ReportWriteError> {
        self.output.write_all(b"\n")?;
        Ok(())
    }

    fn finish(self) -> Result<W, ReportWriteError> {
        Ok(self.output)
    }
}
