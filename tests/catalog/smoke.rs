use crate::common::logger::init_test_logger;
use course_catalog::catalog::loader::CourseLoader;
use course_catalog::container::chained_hash_table::CourseTable;
use std::io::Cursor;

#[test]
fn catalog_smoke_empty_input() {
    init_test_logger();
    let mut table = CourseTable::new();
    let summary = assert_ok!(CourseLoader::default().load_reader(Cursor::new(Vec::new()), &mut table));
    assert_eq!(summary.lines_read, 0);
    assert_eq!(summary.inserted, 0);
    assert!(table.print_all().is_empty());
}
