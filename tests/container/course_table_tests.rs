use crate::common::fixtures::course;
use crate::common::logger::init_test_logger;
use course_catalog::common::config::ValidationMode;
use course_catalog::common::exception::CatalogError;
use course_catalog::container::chained_hash_table::{Bucket, CourseTable, LookupMode};

fn insert_unique(table: &mut CourseTable, number: &str, prereqs: &[&str]) -> bool {
    match table.dupe_check(number) {
        Ok(false) => {
            table.insert(course(number, prereqs));
            true
        }
        _ => false,
    }
}

#[test]
fn scenario_prerequisite_present() {
    init_test_logger();
    let mut table = CourseTable::new();
    assert!(insert_unique(&mut table, "CS101", &[]));
    assert!(insert_unique(&mut table, "CS201", &["CS101"]));

    let report = table.validate_prerequisites(ValidationMode::FixedPoint);

    assert!(report.removed.is_empty());
    assert!(table.search("CS101").is_resolved());
    assert!(table.search("CS201").is_resolved());
    assert_eq!(table.len(), 2);
}

#[test]
fn scenario_prerequisite_never_inserted() {
    init_test_logger();
    let mut table = CourseTable::new();
    assert!(insert_unique(&mut table, "CS301", &["CS999"]));

    let report = table.validate_prerequisites(ValidationMode::FixedPoint);

    assert!(report.was_removed("CS301"));
    assert!(table.search("CS301").is_empty());
    assert_err!(table.exists("CS301", LookupMode::Direct), CatalogError::CourseNotFound(_));
}

#[test]
fn scenario_duplicate_course_number() {
    init_test_logger();
    let mut table = CourseTable::new();
    assert!(insert_unique(&mut table, "CS101", &[]));

    let dupe = assert_err!(table.dupe_check("CS101"));
    assert!(matches!(dupe, CatalogError::DuplicateCourse(ref n) if n == "CS101"));
    assert!(!insert_unique(&mut table, "CS101", &[]));

    let listed: Vec<_> = table
        .print_all()
        .into_iter()
        .filter(|c| c.get_number() == "CS101")
        .collect();
    assert_eq!(listed.len(), 1);
}

#[test]
fn direct_lookup_propagates_not_found() {
    fn lookup(table: &CourseTable, number: &str) -> Result<bool, CatalogError> {
        let found = table.exists(number, LookupMode::Direct)?;
        Ok(found)
    }

    let mut table = CourseTable::new();
    table.insert(course("CS101", &[]));
    assert!(assert_ok!(lookup(&table, "CS101")));
    assert_err!(lookup(&table, "CS102"), CatalogError::CourseNotFound(_));
}

#[test]
fn chain_removal_each_position() {
    let numbers = ["A1", "B2", "C3", "D4", "E5"];
    for removed in 0..numbers.len() {
        let mut table = assert_ok!(CourseTable::with_bucket_count(1));
        for number in numbers {
            table.insert(course(number, &[]));
        }

        assert!(table.remove(numbers[removed]));
        assert!(table.search(numbers[removed]).is_empty());
        assert_eq!(table.chain_len(0), numbers.len() - 1);
        for (i, number) in numbers.iter().enumerate() {
            if i != removed {
                assert_eq!(table.search(number).get_number(), *number);
            }
        }
    }
}

#[test]
fn bucket_returns_to_empty_after_last_removal() {
    let mut table = assert_ok!(CourseTable::with_bucket_count(1));
    table.insert(course("A1", &[]));
    table.insert(course("B2", &[]));

    assert!(table.remove("A1"));
    assert!(matches!(table.get_bucket(0), Some(Bucket::Chain(_))));
    assert!(table.remove("B2"));
    assert_eq!(table.get_bucket(0), Some(&Bucket::Empty));
    assert!(table.is_empty());
}

#[test]
fn validation_walks_every_bucket() {
    init_test_logger();
    let mut table = assert_ok!(CourseTable::with_bucket_count(5));
    for i in 0..40 {
        let number = format!("C{:03}", i);
        let prereq = if i % 4 == 0 {
            vec!["MISSING".to_string()]
        } else if i > 0 {
            vec![format!("C{:03}", i - 1)]
        } else {
            vec![]
        };
        let prereq_refs: Vec<&str> = prereq.iter().map(String::as_str).collect();
        table.insert(course(&number, &prereq_refs));
    }

    table.validate_prerequisites(ValidationMode::FixedPoint);

    // Every course depends, directly or through C(i-1) links, on a multiple
    // of 4, and those all reference a course that was never inserted.
    assert!(table.is_empty());
}
