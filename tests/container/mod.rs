mod course_table_tests;
