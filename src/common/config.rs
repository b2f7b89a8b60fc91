use std::path::PathBuf;

/// Number of buckets a `CourseTable` is created with when none is given.
pub const DEFAULT_BUCKET_COUNT: usize = 179;

/// Multiplier folded into the running accumulator for every character of a course number.
pub const HASH_MULTIPLIER: u64 = 27;

/// UTF-8 byte-order mark that may prefix a course file.
pub const UTF8_BOM: &str = "\u{feff}";

pub const DEFAULT_HISTORY_FILE: &str = "history.txt";

/// Field delimiter of the course-record format.
pub const FIELD_DELIMITER: char = ',';

/// How the prerequisite validation pass treats courses whose prerequisites are
/// removed after they were already checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// One pass over the table. A course marked resolved is never revisited,
    /// even if one of its prerequisites is removed later in the same pass.
    SinglePass,
    /// Repeat cascade passes until a pass removes nothing. Every course left in
    /// the table afterwards only references courses that are still present.
    #[default]
    FixedPoint,
}

/// Configuration options for a catalog session
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub bucket_count: usize,
    pub validation_mode: ValidationMode,
    pub course_file: Option<PathBuf>,
    pub history_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            bucket_count: DEFAULT_BUCKET_COUNT,
            validation_mode: ValidationMode::default(),
            course_file: None,
            history_file: DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}
