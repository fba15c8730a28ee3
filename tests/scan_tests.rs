//! End-to-end scans through the public API.


use fwscan::{
    read_fwf, scan_fwf, ColumnSpec, DataType, Predicate, RowBatch, Scalar, ScanConfig,
};
use test_data_gen::{cleanup, write_fixture, write_generated_fixture};

fn spec_ab() -> ColumnSpec {
    ColumnSpec::Explicit(vec![("a".into(), (0, 3)), ("b".into(), (3, 6))])
}

fn str_values(batch: &RowBatch, column: &str) -> Vec<String> {
    batch
        .column(column)
        .expect("column present")
        .values
        .iter()
        .map(|v| match v {
            Scalar::Str(s) => s.clone(),
            other => panic!("expected string, got {other:?}"),
        })
        .collect()
}

#[test]
fn test_explicit_spec_scan_yields_text_columns() {
    let path = write_fixture("explicit", &["abcdef", "123456"]);
    let source = scan_fwf(&path, &spec_ab(), ScanConfig::default()).unwrap();

    // "abc" and "123" mixed in one column: text
    assert!(source
        .schema()
        .fields
        .iter()
        .all(|f| f.data_type == DataType::Utf8));

    let out = source.lazy().collect().unwrap();
    assert_eq!(out.num_rows(), 2);
    assert_eq!(str_values(&out, "a"), ["abc", "123"]);
    assert_eq!(str_values(&out, "b"), ["def", "456"]);

    cleanup(&path);
}

#[test]
fn test_sequential_spec_discards_filler() {
    let spec = ColumnSpec::Sequential(vec![
        (Some("a".into()), 3),
        (None, 2),
        (Some("b".into()), 3),
    ]);
    let path = write_fixture("sequential", &["abcXX123"]);
    let out = read_fwf(&path, &spec, ScanConfig::default()).unwrap();

    let names: Vec<_> = out.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(str_values(&out, "a"), ["abc"]);
    assert_eq!(str_values(&out, "b"), ["123"]);

    cleanup(&path);
}

#[test]
fn test_row_cap_is_exact_regardless_of_batch_size() {
    let path = write_fixture("cap", &["aaa111", "bbb222", "ccc333", "ddd444", "eee555"]);
    let source = scan_fwf(&path, &spec_ab(), ScanConfig::default()).unwrap();

    for batch_size in [1usize, 2, 100] {
        let total: usize = source
            .lazy()
            .limit(1)
            .with_batch_size(batch_size)
            .stream()
            .unwrap()
            .map(|b| b.unwrap().num_rows())
            .sum();
        assert_eq!(total, 1, "batch_size {batch_size}");
    }

    // a cap beyond the file yields everything
    let total: usize = source
        .lazy()
        .limit(100)
        .stream()
        .unwrap()
        .map(|b| b.unwrap().num_rows())
        .sum();
    assert_eq!(total, 5);

    cleanup(&path);
}

#[test]
fn test_projection_yields_only_requested_columns() {
    let spec = ColumnSpec::Explicit(vec![
        ("a".into(), (0, 2)),
        ("b".into(), (2, 4)),
        ("c".into(), (4, 6)),
    ]);
    let path = write_fixture("project", &["aabbcc", "ddeeff"]);
    let source = scan_fwf(&path, &spec, ScanConfig::default()).unwrap();

    for batch in source.lazy().with_columns(["b"]).stream().unwrap() {
        let batch = batch.unwrap();
        assert_eq!(batch.columns.len(), 1);
        assert_eq!(batch.columns[0].name, "b");
    }

    cleanup(&path);
}

#[test]
fn test_ragged_lines_degrade_to_short_values() {
    let path = write_fixture("ragged", &["abcdef", "abcd", "ab"]);
    let out = read_fwf(&path, &spec_ab(), ScanConfig::default()).unwrap();

    assert_eq!(out.num_rows(), 3);
    assert_eq!(str_values(&out, "a"), ["abc", "abc", "ab"]);
    assert_eq!(str_values(&out, "b"), ["def", "d", ""]);

    cleanup(&path);
}

#[test]
fn test_predicate_is_sound_and_complete_within_cap() {
    let path = write_generated_fixture("pred", 200);
    let spec = ColumnSpec::Explicit(vec![("id".into(), (0, 3)), ("name".into(), (3, 8))]);
    let source = scan_fwf(&path, &spec, ScanConfig::default()).unwrap();

    let out = source
        .lazy()
        .filter(Predicate::parse("id >= 150").unwrap())
        .collect()
        .unwrap();

    // every yielded row satisfies the predicate, and none are missing
    assert_eq!(out.num_rows(), 50);
    for v in &out.column("id").unwrap().values {
        match v {
            Scalar::I64(i) => assert!(*i >= 150),
            other => panic!("expected int id, got {other:?}"),
        }
    }

    // with a cap, the yielded total is min(cap, matching rows)
    let capped = source
        .lazy()
        .filter(Predicate::parse("id >= 150").unwrap())
        .limit(10)
        .collect()
        .unwrap();
    assert_eq!(capped.num_rows(), 10);

    let starved = source
        .lazy()
        .filter(Predicate::parse("id >= 190").unwrap())
        .limit(100)
        .collect()
        .unwrap();
    assert_eq!(starved.num_rows(), 10);

    cleanup(&path);
}

#[test]
fn test_numeric_schema_is_inferred_and_cast() {
    let path = write_fixture("typed", &[" 121.5x", " 349.5y", "  70.0z"]);
    let spec = ColumnSpec::Explicit(vec![
        ("i".into(), (0, 3)),
        ("f".into(), (3, 6)),
        ("s".into(), (6, 7)),
    ]);
    let source = scan_fwf(&path, &spec, ScanConfig::default()).unwrap();

    let types: Vec<_> = source.schema().fields.iter().map(|f| f.data_type).collect();
    assert_eq!(types, [DataType::Int64, DataType::Float64, DataType::Utf8]);

    let out = source.lazy().collect().unwrap();
    assert_eq!(
        out.column("i").unwrap().values,
        [Scalar::I64(12), Scalar::I64(34), Scalar::I64(7)]
    );
    assert_eq!(
        out.column("f").unwrap().values,
        [Scalar::F64(1.5), Scalar::F64(9.5), Scalar::F64(0.0)]
    );

    cleanup(&path);
}

#[test]
fn test_empty_file_defaults_schema_to_text() {
    let path = write_fixture("empty", &[]);
    let source = scan_fwf(&path, &spec_ab(), ScanConfig::default()).unwrap();

    assert!(source
        .schema()
        .fields
        .iter()
        .all(|f| f.data_type == DataType::Utf8));

    let out = source.lazy().collect().unwrap();
    assert_eq!(out.num_rows(), 0);
    assert_eq!(out.columns.len(), 2);

    cleanup(&path);
}

#[test]
fn test_missing_source_surfaces_immediately() {
    let err = scan_fwf(
        "/nonexistent/fwscan-missing.txt",
        &spec_ab(),
        ScanConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        fwscan::Error::SourceUnavailable { .. }
    ));
}
