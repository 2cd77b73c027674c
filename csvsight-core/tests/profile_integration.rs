//! End-to-end checks: bytes through the loader into the profiler.

use csvsight_core::{DataType, LoaderConfig, load_bytes, profile_table};

fn load(content: &str) -> csvsight_core::Table {
    load_bytes("upload.csv", content.as_bytes(), &LoaderConfig::default()).unwrap()
}

#[test]
fn profiles_the_age_city_scenario() {
    let table = load("age,city\n25,NY\n30,NY\n,LA\n");
    let profile = profile_table(&table);

    assert_eq!(profile.row_count, 3);
    assert_eq!(profile.column_count, 2);
    assert_eq!(profile.duplicate_row_count, 0);

    let age_info = &profile.columns[0];
    assert_eq!(age_info.name, "age");
    assert_eq!(age_info.data_type, DataType::Numeric);
    assert_eq!(age_info.missing_count, 1);
    assert_eq!(age_info.missing_percentage, 33.33);
    assert_eq!(age_info.distinct_count, 2);

    let numeric = profile.numeric.as_ref().unwrap();
    assert_eq!(numeric.len(), 1);
    let age = &numeric[0];
    assert_eq!(age.count, 2);
    assert_eq!(age.mean, Some(27.5));
    assert_eq!(age.min, Some(25.0));
    assert_eq!(age.max, Some(30.0));

    let categorical = profile.categorical.as_ref().unwrap();
    assert_eq!(categorical.len(), 1);
    let city = &categorical[0];
    assert_eq!(city.name, "city");
    assert_eq!(city.count, 3);
    assert_eq!(city.distinct_count, 2);
    assert_eq!(city.mode.as_deref(), Some("NY"));
    assert_eq!(city.mode_count, Some(2));
}

#[test]
fn zero_row_table_profiles_without_crashing() {
    let table = load("age,city\n");
    let profile = profile_table(&table);

    assert_eq!(profile.row_count, 0);
    assert_eq!(profile.missing_percentage, 0.0);
    assert_eq!(profile.columns.len(), 2);
    for info in &profile.columns {
        assert_eq!(info.non_missing_count, 0);
        assert_eq!(info.missing_count, 0);
        assert_eq!(info.missing_percentage, 0.0);
    }
}

#[test]
fn numeric_only_table_has_absent_categorical_section() {
    let table = load("a,b\n1,2\n3,4\n");
    let profile = profile_table(&table);

    assert!(profile.categorical.is_none());
    assert_eq!(profile.numeric.as_ref().unwrap().len(), 2);
}

#[test]
fn text_only_table_has_absent_numeric_section() {
    let table = load("a,b\nx,y\n");
    let profile = profile_table(&table);

    assert!(profile.numeric.is_none());
    assert_eq!(profile.categorical.as_ref().unwrap().len(), 2);
}

#[test]
fn total_cells_property_holds() {
    let table = load("a,b,c\n1,2,3\n4,5,6\n");
    assert_eq!(
        table.total_cells(),
        table.row_count() * table.column_count()
    );
}

#[test]
fn column_info_has_one_row_per_column_summing_to_row_count() {
    let table = load("a,b\n1,\n,x\n2,y\n");
    let profile = profile_table(&table);

    assert_eq!(profile.columns.len() as u64, table.column_count());
    for info in &profile.columns {
        assert_eq!(
            info.non_missing_count + info.missing_count,
            table.row_count()
        );
    }
}

#[test]
fn profiling_is_idempotent_across_reloads() {
    let content = "age,city\n25,NY\n30,NY\n,LA\n";
    let first = profile_table(&load(content));
    let second = profile_table(&load(content));

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.numeric, second.numeric);
    assert_eq!(first.categorical, second.categorical);
}

#[test]
fn duplicate_rows_are_counted_in_the_profile() {
    let table = load("a,b\n1,x\n1,x\n2,y\n1,x\n");
    let profile = profile_table(&table);
    assert_eq!(profile.duplicate_row_count, 2);
}
