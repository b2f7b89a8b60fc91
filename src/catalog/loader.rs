use crate::catalog::course::Course;
use crate::common::config::{ValidationMode, FIELD_DELIMITER, UTF8_BOM};
use crate::common::exception::{CatalogError, CourseField};
use crate::container::chained_hash_table::{CourseTable, ValidationReport};
use log::{debug, error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const INVALID_UTF8_REASON: &str = "line is not valid UTF-8";

/// Parses one `number,name[,prereq...]` record.
///
/// Fields are trimmed, and empty prerequisite fields are dropped, so a trailing
/// comma (`CS101,Intro,`) means "no prerequisites".
pub fn parse_course_line(line: &str) -> Result<Course, CatalogError> {
    let mut fields = line.split(FIELD_DELIMITER).map(str::trim);

    let number = required_field(fields.next(), CourseField::Number, line)?;
    let name = required_field(fields.next(), CourseField::Name, line)?;
    let prerequisites = fields
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Course::new(number, name, prerequisites))
}

fn required_field<'a>(
    field: Option<&'a str>,
    kind: CourseField,
    line: &str,
) -> Result<&'a str, CatalogError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CatalogError::MissingField {
            field: kind,
            line: line.to_string(),
        }),
    }
}

/// A line that never reached the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub lines_read: usize,
    pub inserted: usize,
    pub rejected: Vec<RejectedRecord>,
    /// Course numbers skipped because they were already in the table.
    pub duplicates: Vec<String>,
    pub validation: ValidationReport,
}

/// Feeds course records into a [`CourseTable`] and validates prerequisites
/// once all of them are in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseLoader {
    validation_mode: ValidationMode,
}

impl CourseLoader {
    pub fn new(validation_mode: ValidationMode) -> Self {
        Self { validation_mode }
    }

    /// Loads every record of the file at `path` into `table`.
    ///
    /// # Returns
    ///
    /// `CatalogError::Io` if the file cannot be opened or read. Bad records and
    /// duplicates are not errors; they are listed in the summary.
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
        table: &mut CourseTable,
    ) -> Result<LoadSummary, CatalogError> {
        let path = path.as_ref();
        info!("Loading courses from {}", path.display());
        let file = File::open(path)?;
        self.load_reader(BufReader::new(file), table)
    }

    /// Loads every line of `reader` into `table`, then runs the validation
    /// pass.
    ///
    /// Validation runs even when reading stops on an I/O error, so the table
    /// never holds unresolved courses after this returns.
    pub fn load_reader<R: BufRead>(
        &self,
        reader: R,
        table: &mut CourseTable,
    ) -> Result<LoadSummary, CatalogError> {
        let mut summary = LoadSummary::default();

        let ingested = Self::ingest(reader, table, &mut summary);
        summary.validation = table.validate_prerequisites(self.validation_mode);

        if let Err(e) = ingested {
            error!(
                "Read failed after line {}: {} ({} course(s) kept after validation)",
                summary.lines_read,
                e,
                table.len()
            );
            return Err(e.into());
        }

        info!(
            "Loaded {} course(s) from {} line(s): {} rejected, {} duplicate(s), {} removed by validation",
            summary.inserted,
            summary.lines_read,
            summary.rejected.len(),
            summary.duplicates.len(),
            summary.validation.removed.len()
        );
        Ok(summary)
    }

    fn ingest<R: BufRead>(
        mut reader: R,
        table: &mut CourseTable,
        summary: &mut LoadSummary,
    ) -> std::io::Result<()> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            summary.lines_read += 1;
            let line_number = summary.lines_read;

            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(e) => {
                    let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    warn!("Skipping line {}: not valid UTF-8 ({})", line_number, lossy);
                    summary.rejected.push(RejectedRecord {
                        line_number,
                        line: lossy,
                        reason: INVALID_UTF8_REASON.to_string(),
                    });
                    continue;
                }
            };

            let record = if line_number == 1 {
                line.strip_prefix(UTF8_BOM).unwrap_or(&line)
            } else {
                line.as_str()
            };
            if record.trim().is_empty() {
                debug!("Skipping blank line {}", line_number);
                continue;
            }

            let course = match parse_course_line(record) {
                Ok(course) => course,
                Err(e) => {
                    warn!("Error parsing line {}: {} ({})", line_number, record, e);
                    summary.rejected.push(RejectedRecord {
                        line_number,
                        line: record.to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match table.dupe_check(course.get_number()) {
                Ok(_) => {
                    table.insert(course);
                    summary.inserted += 1;
                }
                Err(e) => {
                    warn!("Skipping line {}: {}", line_number, e);
                    summary.duplicates.push(course.get_number().to_string());
                }
            }
        }
    }
}
