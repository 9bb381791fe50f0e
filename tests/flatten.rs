//! Tests for value flattening.

mod common;

use common::*;
use sheetmap::*;

#[derive(Debug, Default)]
struct Counter {
    total: u64,
}
impl_record!(Counter { total => "Total" });

#[test]
fn test_values_align_with_headers() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let cols = headers::<ComplexStruct>(&registry);
    for record in [sample_complex(), sparse_complex(), ComplexStruct::default()] {
        assert_eq!(values(&record, &registry)?.len(), cols.len());
    }
    Ok(())
}

#[test]
fn test_complex_values() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let row = values(&sample_complex(), &registry)?;
    assert_eq!(
        row,
        vec![
            CellValue::from("ID-00042"),
            CellValue::from("Alice"),
            CellValue::from("1990-01-01T00:00:00Z"),
            CellValue::Float(165.5),
            CellValue::Bool(true),
            CellValue::from("admin"),
            CellValue::from("alice@example.com"),
            CellValue::from("555-0100"),
            CellValue::from("1 Main St"),
            CellValue::from("Springfield"),
            CellValue::from("12345"),
            CellValue::Bool(true),
        ]
    );
    Ok(())
}

#[test]
fn test_collection_exports_first_element_only() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let row = values(&sample_complex(), &registry)?;
    assert!(!row.contains(&CellValue::from("ops")));
    assert!(!row.contains(&CellValue::from("alice@work.example")));
    Ok(())
}

#[test]
fn test_absent_values_flatten_to_null() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let row = values(&sparse_complex(), &registry)?;
    assert_eq!(row[3], CellValue::Null); // Height
    assert_eq!(row[5], CellValue::Null); // Tags
    assert_eq!(row[6], CellValue::from("bob@example.com"));
    assert_eq!(&row[7..11], &[CellValue::Null, CellValue::Null, CellValue::Null, CellValue::Null]);
    assert_eq!(row[11], CellValue::Bool(true));
    Ok(())
}

#[test]
fn test_empty_collection_of_records_pads_every_column() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let record = ComplexStruct {
        contact_infos: Vec::new(),
        ..sample_complex()
    };
    let row = values(&record, &registry)?;
    assert!(row[6..].iter().all(CellValue::is_null));
    assert_eq!(row.len(), 12);
    Ok(())
}

#[test]
fn test_timestamp_stays_typed_without_registry_entry() -> anyhow::Result<()> {
    let mut registry = custom_id_registry();
    assert!(registry.remove::<chrono::DateTime<chrono::Utc>>());
    let row = values(&sample_complex(), &registry)?;
    assert_eq!(row[2], CellValue::Timestamp(birth_date()));
    Ok(())
}

#[test]
fn test_registered_record_type_is_converted_as_one_cell() -> anyhow::Result<()> {
    let mut registry = TypeRegistry::default();
    registry.register_converter::<Address, String>(|a| Ok(format!("{}, {}", a.street, a.city)));

    let row = values(&primary_contact(), &registry)?;
    assert_eq!(
        row,
        vec![
            CellValue::from("alice@example.com"),
            CellValue::from("555-0100"),
            CellValue::from("1 Main St, Springfield"),
            CellValue::Bool(true),
        ]
    );

    let bare = ContactInfo::default();
    assert_eq!(values(&bare, &registry)?[2], CellValue::Null);
    Ok(())
}

#[test]
fn test_converter_failure_names_column() {
    let mut registry = TypeRegistry::default();
    registry.register_converter::<CustomId, String>(|id| {
        if id.0 == 0 {
            Err("zero is not a valid id".to_string())
        } else {
            Ok(format!("ID-{:05}", id.0))
        }
    });

    let err = values(&ComplexStruct::default(), &registry).unwrap_err();
    match &err {
        ExportError::Convert { column, target, .. } => {
            assert_eq!(column, "ID");
            assert_eq!(*target, TypeTag::of::<CustomId>());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("zero is not a valid id"));
}

#[test]
fn test_opaque_type_without_converter_fails() {
    let registry = TypeRegistry::default();
    let err = values(&sample_complex(), &registry).unwrap_err();
    assert!(matches!(err, ExportError::Unregistered { ref column, .. } if column == "ID"));
}

#[test]
fn test_unsigned_out_of_range_fails() {
    let registry = TypeRegistry::default();
    assert_eq!(
        values(&Counter { total: 7 }, &registry).unwrap(),
        vec![CellValue::Int(7)]
    );

    let err = values(&Counter { total: u64::MAX }, &registry).unwrap_err();
    assert!(matches!(err, ExportError::OutOfRange { ref column, .. } if column == "Total"));
}

#[test]
fn test_nested_error_column_uses_full_path() {
    #[derive(Debug, Default)]
    struct Holder {
        inner: Vec<Counter>,
    }
    impl_record!(Holder { inner => "Inner" });

    let registry = TypeRegistry::default();
    let holder = Holder {
        inner: vec![Counter { total: u64::MAX }],
    };
    let err = values(&holder, &registry).unwrap_err();
    assert!(matches!(err, ExportError::OutOfRange { ref column, .. } if column == "Inner Total"));
}
