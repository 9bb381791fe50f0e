//! Tests for setting fields by header path.

mod common;

use common::*;
use sheetmap::*;

#[test]
fn test_set_scalar_fields() -> anyhow::Result<()> {
    let registry = TypeRegistry::default();
    let mut s = SimpleStruct::default();
    set_field(&mut s, "Name", &CellValue::from("Alice"), &registry)?;
    set_field(&mut s, "Age", &CellValue::Int(30), &registry)?;
    set_field(&mut s, "Height", &CellValue::Float(165.5), &registry)?;
    set_field(&mut s, "IsActive", &CellValue::Bool(true), &registry)?;
    assert_eq!(s, simple_people()[0]);
    Ok(())
}

#[test]
fn test_numeric_and_bool_fields_parse_text() -> anyhow::Result<()> {
    let registry = TypeRegistry::default();
    let mut s = SimpleStruct::default();
    set_field(&mut s, "Age", &CellValue::from("45"), &registry)?;
    set_field(&mut s, "Height", &CellValue::Int(180), &registry)?;
    set_field(&mut s, "IsActive", &CellValue::from("true"), &registry)?;
    assert_eq!(s.age, 45);
    assert_eq!(s.height, 180.0);
    assert!(s.active);
    Ok(())
}

#[test]
fn test_string_field_rejects_non_text() {
    let registry = TypeRegistry::default();
    let mut s = SimpleStruct::default();
    let err = set_field(&mut s, "Name", &CellValue::Int(42), &registry).unwrap_err();
    assert!(matches!(err, FieldError::NotText("int")));
    assert_eq!(s.name, "");
}

#[test]
fn test_numeric_parse_failure() {
    let registry = TypeRegistry::default();
    let mut s = SimpleStruct::default();
    let err = set_field(&mut s, "Age", &CellValue::from("invalid"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::ParseInt(_)));
    let err = set_field(&mut s, "Age", &CellValue::Float(1.5), &registry).unwrap_err();
    assert!(matches!(err, FieldError::ParseInt(_)));
    let err = set_field(&mut s, "IsActive", &CellValue::Int(1), &registry).unwrap_err();
    assert!(matches!(err, FieldError::ParseBool(_)));
    assert_eq!(s, SimpleStruct::default());
}

#[test]
fn test_null_cell_is_skipped() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "Height", &CellValue::Null, &registry)?;
    set_field(&mut c, "ContactInfos Address City", &CellValue::Null, &registry)?;
    set_field(&mut c, "No Such Column", &CellValue::Null, &registry)?;
    assert_eq!(c, ComplexStruct::default());
    Ok(())
}

#[test]
fn test_nested_path_allocates_collection_and_option() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "ContactInfos Address City", &CellValue::from("Springfield"), &registry)?;
    set_field(&mut c, "ContactInfos Email", &CellValue::from("a@example.com"), &registry)?;
    set_field(&mut c, "ContactInfos Address ZIP", &CellValue::from("12345"), &registry)?;

    assert_eq!(c.contact_infos.len(), 1);
    let contact = &c.contact_infos[0];
    assert_eq!(contact.email, "a@example.com");
    assert_eq!(contact.phone, None);
    assert_eq!(
        contact.address,
        Some(Address {
            street: String::new(),
            city: "Springfield".into(),
            zip: "12345".into(),
        })
    );
    Ok(())
}

#[test]
fn test_collection_of_scalars() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "Tags", &CellValue::from("admin"), &registry)?;
    set_field(&mut c, "Height", &CellValue::Float(170.5), &registry)?;
    assert_eq!(c.tags, vec!["admin".to_string()]);
    assert_eq!(c.height, Some(170.5));
    Ok(())
}

#[test]
fn test_failed_assignment_rolls_back_new_structure() {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();

    let err = set_field(&mut c, "ContactInfos Verified", &CellValue::from("maybe"), &registry);
    assert!(matches!(err, Err(FieldError::ParseBool(_))));
    assert!(c.contact_infos.is_empty());

    let err = set_field(&mut c, "ContactInfos Address ZIP", &CellValue::Int(12345), &registry);
    assert!(matches!(err, Err(FieldError::NotText(_))));
    assert!(c.contact_infos.is_empty());

    let err = set_field(&mut c, "Height", &CellValue::from("tall"), &registry);
    assert!(matches!(err, Err(FieldError::ParseFloat(_))));
    assert_eq!(c.height, None);
}

#[test]
fn test_failed_assignment_keeps_existing_element() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "ContactInfos Email", &CellValue::from("a@example.com"), &registry)?;

    let err = set_field(&mut c, "ContactInfos Address ZIP", &CellValue::Int(12345), &registry);
    assert!(err.is_err());
    assert_eq!(c.contact_infos.len(), 1);
    assert_eq!(c.contact_infos[0].email, "a@example.com");
    assert_eq!(c.contact_infos[0].address, None);
    Ok(())
}

#[test]
fn test_unknown_and_malformed_paths() {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();

    let err = set_field(&mut c, "Nope", &CellValue::from("x"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::NoSuchField(ref name) if name == "Nope"));

    let err = set_field(&mut c, "internal_note", &CellValue::from("x"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::NoSuchField(_)));

    let err = set_field(&mut c, "Name Extra", &CellValue::from("x"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::NotARecord { ref segment, .. } if segment == "Extra"));

    let err = set_field(&mut c, "ContactInfos", &CellValue::from("x"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::UnsupportedRecord(tag) if tag == TypeTag::of::<ContactInfo>()));
    assert!(c.contact_infos.is_empty());
    assert_eq!(c, ComplexStruct::default());
}

#[test]
fn test_custom_parser_round_trip() -> anyhow::Result<()> {
    let registry = custom_id_registry();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "ID", &CellValue::from("ID-00042"), &registry)?;
    assert_eq!(c.id, CustomId(42));

    let err = set_field(&mut c, "ID", &CellValue::from("42"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::Custom { target, .. } if target == TypeTag::of::<CustomId>()));
    assert!(err.to_string().contains("missing ID- prefix"));
    assert_eq!(c.id, CustomId(42));
    Ok(())
}

#[test]
fn test_opaque_type_without_parser_is_unsupported() {
    let registry = TypeRegistry::default();
    let mut c = ComplexStruct::default();
    let err = set_field(&mut c, "ID", &CellValue::from("ID-00042"), &registry).unwrap_err();
    assert!(matches!(err, FieldError::Unsupported(tag) if tag == TypeTag::of::<CustomId>()));
}

#[test]
fn test_registered_parser_overrides_builtin_handling() {
    let mut registry = TypeRegistry::default();
    registry.register_parser::<String, String>(|s| Ok(s.to_uppercase()));
    let mut s = SimpleStruct::default();
    set_field(&mut s, "Name", &CellValue::from("alice"), &registry).unwrap();
    assert_eq!(s.name, "ALICE");
}

#[test]
fn test_timestamp_field() -> anyhow::Result<()> {
    let registry = TypeRegistry::default();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "BirthDate", &CellValue::from("1990-01-01T02:00:00+02:00"), &registry)?;
    assert_eq!(c.birth_date, birth_date());

    let empty = TypeRegistry::empty();
    let mut c = ComplexStruct::default();
    set_field(&mut c, "BirthDate", &CellValue::Timestamp(birth_date()), &empty)?;
    assert_eq!(c.birth_date, birth_date());

    let err = set_field(&mut c, "BirthDate", &CellValue::from("yesterday"), &empty).unwrap_err();
    assert!(matches!(err, FieldError::ParseTimestamp(_)));
    Ok(())
}
