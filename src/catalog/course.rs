use std::fmt;

/// A single course record.
///
/// `Course::default()` doubles as the "not found" value returned by
/// [`CourseTable::search`](crate::container::chained_hash_table::CourseTable::search):
/// every stored course has a non-empty number, so an empty number means no match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Course {
    number: String,
    name: String,
    prerequisites: Vec<String>,
    resolved: bool,
}

impl Course {
    /// Creates a new course.
    ///
    /// # Arguments
    ///
    /// * `number` - The unique course number.
    /// * `name` - The display name.
    /// * `prerequisites` - Course numbers this course depends on, in input order.
    ///
    /// A course without prerequisites starts out resolved; any other course stays
    /// unresolved until the validation pass confirms its prerequisites.
    pub fn new(number: impl Into<String>, name: impl Into<String>, prerequisites: Vec<String>) -> Self {
        let resolved = prerequisites.is_empty();
        Self {
            number: number.into(),
            name: name.into(),
            prerequisites,
            resolved,
        }
    }

    pub fn get_number(&self) -> &str {
        &self.number
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns true for the "not found" value.
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }

    /// Prerequisites joined by spaces, or `None` when there are none.
    pub fn prerequisites_display(&self) -> String {
        if self.prerequisites.is_empty() {
            "None".to_string()
        } else {
            self.prerequisites.join(" ")
        }
    }

    // Only the validation pass flips this, and only from false to true.
    pub(crate) fn mark_resolved(&mut self) {
        self.resolved = true;
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course Number: {}", self.number)?;
        writeln!(f, "Course Name: {}", self.name)?;
        write!(f, "Prerequisites: {}", self.prerequisites_display())
    }
}
