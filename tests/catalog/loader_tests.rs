use crate::common::fixtures::{write_course_file, ABCU_COURSES};
use crate::common::logger::init_test_logger;
use course_catalog::catalog::loader::CourseLoader;
use course_catalog::common::config::ValidationMode;
use course_catalog::common::exception::CatalogError;
use course_catalog::container::chained_hash_table::CourseTable;

#[test]
fn load_abcu_course_file() {
    init_test_logger();
    let file = write_course_file(ABCU_COURSES.as_bytes());
    let mut table = CourseTable::new();

    let summary = assert_ok!(CourseLoader::default().load_file(file.path(), &mut table));

    assert_eq!(summary.lines_read, 8);
    assert_eq!(summary.inserted, 8);
    assert!(summary.validation.was_removed("CSCI350"));
    assert!(summary.validation.was_removed("CSCI400"));

    let numbers: Vec<String> = table
        .print_all()
        .iter()
        .map(|c| c.get_number().to_string())
        .collect();
    assert_eq!(
        numbers,
        vec!["CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI301", "MATH201"]
    );
    assert!(table.print_all().iter().all(|c| c.is_resolved()));

    let algorithms = table.search("CSCI300");
    assert_eq!(algorithms.get_name(), "Introduction to Algorithms");
    assert_eq!(algorithms.prerequisites_display(), "CSCI200 MATH201");
}

#[test]
fn load_file_with_bom_and_crlf() {
    init_test_logger();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"CSCI100,Introduction to Computer Science\r\nCSCI101,Programming,CSCI100\r\n");
    let file = write_course_file(&bytes);
    let mut table = CourseTable::new();

    let summary = assert_ok!(CourseLoader::default().load_file(file.path(), &mut table));

    assert_eq!(summary.inserted, 2);
    assert!(summary.rejected.is_empty());
    assert_eq!(table.search("CSCI100").get_number(), "CSCI100");
    assert!(table.search("CSCI101").is_resolved());
}

#[test]
fn malformed_records_are_skipped() {
    init_test_logger();
    let file = write_course_file(b"CSCI100,Intro\n,Missing Number\nCSCI200\nCSCI100,Again\nCSCI200,Data Structures,CSCI100\n");
    let mut table = CourseTable::new();

    let summary = assert_ok!(CourseLoader::default().load_file(file.path(), &mut table));

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.rejected.len(), 2);
    assert_eq!(summary.duplicates, vec!["CSCI100".to_string()]);
    assert!(summary.rejected[0].reason.contains("Course Number Missing"));
    assert!(summary.rejected[1].reason.contains("Course Name Missing"));
    assert_eq!(table.len(), 2);
}

#[test]
fn single_pass_mode_leaves_order_sensitive_course() {
    init_test_logger();
    // One bucket keeps file order: A is checked before B is removed.
    let file = write_course_file(b"A,First,B\nB,Second,Z\n");
    let mut table = assert_ok!(CourseTable::with_bucket_count(1));

    let summary = assert_ok!(CourseLoader::new(ValidationMode::SinglePass).load_file(file.path(), &mut table));
    assert_eq!(summary.validation.passes, 1);
    assert!(!table.search("A").is_empty());

    let file = write_course_file(b"A,First,B\nB,Second,Z\n");
    let mut table = assert_ok!(CourseTable::with_bucket_count(1));
    let summary = assert_ok!(CourseLoader::new(ValidationMode::FixedPoint).load_file(file.path(), &mut table));
    assert!(summary.validation.was_removed("A"));
    assert!(table.is_empty());
}

#[test]
fn missing_file_reports_io_error() {
    let mut table = CourseTable::new();
    assert_err!(
        CourseLoader::default().load_file("no/such/courses.csv", &mut table),
        CatalogError::Io(_)
    );
    assert!(table.is_empty());
}
