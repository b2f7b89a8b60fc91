//! # Chained Course Table
//!
//! A fixed-size hash table with separate chaining that owns every [`Course`] in
//! the catalog, keyed by course number.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                            CourseTable                               │
//!   │                                                                      │
//!   │   hash_fn: CourseHashFunction   (acc = (acc * 27 + c) % B)           │
//!   │                                                                      │
//!   │   buckets: Vec<Bucket>   (length B, fixed at construction)           │
//!   │                                                                      │
//!   │   [0]  Empty                                                         │
//!   │   [1]  Chain ──► [CS101] ─ [MATH201]          (insertion order)      │
//!   │   [2]  Empty                                                         │
//!   │   [3]  Chain ──► [CS300]                                             │
//!   │   ...                                                                │
//!   │   [B-1] Empty                                                        │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bucket is either `Empty` or a `Chain` holding at least one course. Taking
//! the last course out of a chain turns the bucket back into `Empty`, so an
//! empty chain is never observable.
//!
//! ## Load / Validate Protocol
//!
//! ```text
//!   for each parsed record:
//!        dupe_check(number) ── Err(DuplicateCourse) ──► skip record
//!              │ Ok(false)
//!              ▼
//!        insert(course)               (appends to the bucket's chain)
//!
//!   after the last record:
//!        validate_prerequisites(mode)
//!              │
//!              ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ pass 1: every unresolved course                                      │
//!   │   all prerequisites exist  → mark resolved, advance cursor           │
//!   │   first missing prereq     → remove course, cursor stays put         │
//!   │                              (the next sibling slid into the slot)   │
//!   ├──────────────────────────────────────────────────────────────────────┤
//!   │ FixedPoint only, while the previous pass removed something:          │
//!   │ cascade pass: every course with prerequisites, resolved or not       │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Operations
//!
//! | Method                      | Complexity | Description                             |
//! |-----------------------------|------------|-----------------------------------------|
//! | `insert(course)`            | O(1)       | Append to the bucket's chain            |
//! | `dupe_check(&k)`            | O(chain)   | `Err(DuplicateCourse)` if present       |
//! | `exists(&k, mode)`          | O(chain)   | Presence, miss is an error in `Direct`  |
//! | `search(&k)`                | O(chain)   | Clone of the course or the empty value  |
//! | `remove(&k)`                | O(chain)   | `true` if a course was removed          |
//! | `validate_prerequisites(m)` | O(n · p)   | Resolve or discard every course         |
//! | `print_all()`               | O(n log n) | All courses sorted by number            |
//!
//! The bucket count never changes, so chains grow without bound as the table
//! fills. That is a known scaling limit of this table.

use crate::catalog::course::Course;
use crate::common::config::{ValidationMode, DEFAULT_BUCKET_COUNT};
use crate::common::exception::CatalogError;
use crate::common::result_writer::ResultWriter;
use crate::container::hash_function::CourseHashFunction;
use log::{debug, info, trace, warn};

/// One slot of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Bucket {
    /// Nothing has hashed here, or everything that did has been removed.
    #[default]
    Empty,
    /// Courses that hashed here, in insertion order. Never empty.
    Chain(Vec<Course>),
}

impl Bucket {
    pub fn len(&self) -> usize {
        match self {
            Bucket::Empty => 0,
            Bucket::Chain(chain) => chain.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Bucket::Empty)
    }

    pub fn courses(&self) -> &[Course] {
        match self {
            Bucket::Empty => &[],
            Bucket::Chain(chain) => chain.as_slice(),
        }
    }

    fn position(&self, number: &str) -> Option<usize> {
        self.courses()
            .iter()
            .position(|course| course.get_number() == number)
    }
}

/// How a miss is reported by [`CourseTable::exists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// A miss is an expected outcome and yields `Ok(false)`.
    PrerequisiteCheck,
    /// A miss means the caller expected the course to be there and yields
    /// `Err(CatalogError::CourseNotFound)`.
    Direct,
}

/// A course discarded by the validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCourse {
    pub number: String,
    pub missing_prerequisite: String,
    /// 1-based pass in which the course was removed.
    pub pass: usize,
}

/// Outcome of [`CourseTable::validate_prerequisites`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Courses whose resolved flag was set by this validation.
    pub resolved: Vec<String>,
    pub removed: Vec<RemovedCourse>,
    pub passes: usize,
}

impl ValidationReport {
    pub fn was_removed(&self, number: &str) -> bool {
        self.removed.iter().any(|r| r.number == number)
    }
}

#[derive(Debug)]
pub struct CourseTable {
    buckets: Vec<Bucket>,
    hash_fn: CourseHashFunction,
    len: usize,
}

impl CourseTable {
    /// Creates a table with the default bucket count (179).
    pub fn new() -> Self {
        Self {
            buckets: vec![Bucket::Empty; DEFAULT_BUCKET_COUNT],
            hash_fn: CourseHashFunction::new(DEFAULT_BUCKET_COUNT),
            len: 0,
        }
    }

    /// Creates a table with a fixed number of buckets.
    ///
    /// # Arguments
    ///
    /// * `bucket_count` - Number of buckets. The table is never resized.
    ///
    /// # Returns
    ///
    /// `CatalogError::InvalidBucketCount` if `bucket_count` is zero.
    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, CatalogError> {
        if bucket_count == 0 {
            return Err(CatalogError::InvalidBucketCount(bucket_count));
        }
        Ok(Self {
            buckets: vec![Bucket::Empty; bucket_count],
            hash_fn: CourseHashFunction::new(bucket_count),
            len: 0,
        })
    }

    pub fn get_bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of courses currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket index a course number hashes to.
    pub fn bucket_of(&self, number: &str) -> usize {
        self.hash_fn.get_hash(number)
    }

    pub fn get_bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    pub fn chain_len(&self, index: usize) -> usize {
        self.buckets.get(index).map_or(0, Bucket::len)
    }

    /// Inserts a course at the tail of its bucket's chain.
    ///
    /// No duplicate check happens here. Callers that need unique course numbers
    /// must call [`dupe_check`](Self::dupe_check) first.
    pub fn insert(&mut self, course: Course) {
        let index = self.hash_fn.get_hash(course.get_number());
        trace!("Inserting course {} into bucket {}", course.get_number(), index);

        let bucket = &mut self.buckets[index];
        match *bucket {
            Bucket::Empty => *bucket = Bucket::Chain(vec![course]),
            Bucket::Chain(ref mut chain) => chain.push(course),
        }
        self.len += 1;
    }

    /// Checks whether a course number is already stored.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if the number is free, `Err(CatalogError::DuplicateCourse)` if
    /// a course with this number already exists.
    pub fn dupe_check(&self, number: &str) -> Result<bool, CatalogError> {
        if self.contains(number) {
            return Err(CatalogError::DuplicateCourse(number.to_string()));
        }
        Ok(false)
    }

    /// Checks whether a course number is stored.
    ///
    /// # Arguments
    ///
    /// * `number` - The course number to look up.
    /// * `mode` - Whether a miss is expected (`PrerequisiteCheck`) or an error (`Direct`).
    pub fn exists(&self, number: &str, mode: LookupMode) -> Result<bool, CatalogError> {
        if self.contains(number) {
            return Ok(true);
        }
        match mode {
            LookupMode::PrerequisiteCheck => Ok(false),
            LookupMode::Direct => Err(CatalogError::CourseNotFound(number.to_string())),
        }
    }

    /// Returns a copy of the course with the given number, or `Course::default()`
    /// (empty number) if there is none.
    pub fn search(&self, number: &str) -> Course {
        let index = self.hash_fn.get_hash(number);
        self.buckets[index]
            .courses()
            .iter()
            .find(|course| course.get_number() == number)
            .cloned()
            .unwrap_or_default()
    }

    /// Removes the course with the given number.
    ///
    /// The remaining courses in the chain keep their relative order. Removing the
    /// only course of a chain returns the bucket to `Empty`.
    ///
    /// # Returns
    ///
    /// `true` if a course was removed, `false` if the number was not stored.
    pub fn remove(&mut self, number: &str) -> bool {
        let index = self.hash_fn.get_hash(number);
        match self.buckets[index].position(number) {
            Some(position) => {
                self.remove_at(index, position);
                true
            }
            None => {
                trace!("Course {} not found in bucket {}, nothing removed", number, index);
                false
            }
        }
    }

    /// Resolves or discards every course based on whether its prerequisites are stored.
    ///
    /// Courses with a missing prerequisite are removed and listed in the report.
    /// See [`ValidationMode`] for how removals cascade.
    pub fn validate_prerequisites(&mut self, mode: ValidationMode) -> ValidationReport {
        let mut report = ValidationReport::default();

        report.passes = 1;
        let mut removed = self.run_validation_pass(1, false, &mut report);

        if mode == ValidationMode::FixedPoint {
            while removed > 0 {
                report.passes += 1;
                removed = self.run_validation_pass(report.passes, true, &mut report);
            }
        }

        info!(
            "Prerequisite validation finished after {} pass(es): {} resolved, {} removed, {} remaining",
            report.passes,
            report.resolved.len(),
            report.removed.len(),
            self.len
        );
        report
    }

    /// Returns every course sorted by course number.
    pub fn print_all(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self
            .buckets
            .iter()
            .flat_map(|bucket| bucket.courses().iter().cloned())
            .collect();
        courses.sort_by(|a, b| a.get_number().cmp(b.get_number()));
        courses
    }

    /// Writes every course, sorted by course number, to `writer`.
    pub fn print_all_to(&self, writer: &mut impl ResultWriter) {
        writer.write_schema_header(vec![
            "Course Number".to_string(),
            "Course Name".to_string(),
            "Prerequisites".to_string(),
        ]);
        for course in self.print_all() {
            writer.write_row(vec![
                course.get_number().to_string(),
                course.get_name().to_string(),
                course.prerequisites_display(),
            ]);
        }
    }

    /// Drops every course. The bucket count is unchanged.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|bucket| *bucket = Bucket::Empty);
        self.len = 0;
    }

    fn contains(&self, number: &str) -> bool {
        let index = self.hash_fn.get_hash(number);
        self.buckets[index].position(number).is_some()
    }

    fn remove_at(&mut self, index: usize, position: usize) -> Course {
        let Bucket::Chain(chain) = &mut self.buckets[index] else {
            unreachable!("remove_at called on an empty bucket");
        };
        let removed = chain.remove(position);
        if chain.is_empty() {
            self.buckets[index] = Bucket::Empty;
        }
        self.len -= 1;
        trace!(
            "Removed course {} from bucket {} at position {}",
            removed.get_number(),
            index,
            position
        );
        removed
    }

    fn first_missing_prerequisite(&self, index: usize, position: usize) -> Option<String> {
        self.buckets[index].courses()[position]
            .get_prerequisites()
            .iter()
            .find(|prereq| !self.contains(prereq))
            .cloned()
    }

    /// Walks every chain once. With `cascade` set, resolved courses that have
    /// prerequisites are re-checked as well. Returns the number of courses removed.
    fn run_validation_pass(
        &mut self,
        pass: usize,
        cascade: bool,
        report: &mut ValidationReport,
    ) -> usize {
        debug!("Starting validation pass {} (cascade: {})", pass, cascade);
        let mut removed = 0;

        for index in 0..self.buckets.len() {
            // A removal shifts the next sibling into `position`, so the cursor
            // only advances when the current course stays.
            let mut position = 0;
            while position < self.buckets[index].len() {
                let course = &self.buckets[index].courses()[position];
                let needs_check =
                    !course.is_resolved() || (cascade && course.has_prerequisites());
                if !needs_check {
                    position += 1;
                    continue;
                }

                match self.first_missing_prerequisite(index, position) {
                    Some(missing) => {
                        let course = self.remove_at(index, position);
                        warn!(
                            "Course {} has an invalid prerequisite: {}",
                            course.get_number(),
                            missing
                        );
                        warn!(
                            "Course {} removed due to invalid prerequisite",
                            course.get_number()
                        );
                        report.removed.push(RemovedCourse {
                            number: course.get_number().to_string(),
                            missing_prerequisite: missing,
                            pass,
                        });
                        removed += 1;
                    }
                    None => {
                        if let Bucket::Chain(chain) = &mut self.buckets[index] {
                            let course = &mut chain[position];
                            if !course.is_resolved() {
                                course.mark_resolved();
                                report.resolved.push(course.get_number().to_string());
                            }
                        }
                        position += 1;
                    }
                }
            }
        }

        debug!("Validation pass {} removed {} course(s)", pass, removed);
        removed
    }
}

impl Default for CourseTable {
    fn default() -> Self {
        Self::new()
    }
}
