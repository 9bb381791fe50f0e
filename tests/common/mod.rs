//! Shared record fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sheetmap::{TypeRegistry, impl_opaque, impl_record};
use std::convert::Infallible;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleStruct {
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub active: bool,
}
impl_record!(SimpleStruct {
    name => "Name",
    age => "Age",
    height => "Height",
    active => "IsActive",
});

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomId(pub u32);
impl_opaque!(CustomId);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}
impl_record!(Address {
    street => "Street",
    city => "City",
    zip => "ZIP",
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactInfo {
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub verified: bool,
}
impl_record!(ContactInfo {
    email => "Email",
    phone => "Phone",
    address => "Address",
    verified => "Verified",
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexStruct {
    pub id: CustomId,
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub height: Option<f64>,
    pub is_active: bool,
    pub tags: Vec<String>,
    pub contact_infos: Vec<ContactInfo>,
    pub internal_note: String,
}
impl_record!(ComplexStruct {
    id => "ID",
    name => "Name",
    birth_date => "BirthDate",
    height => "Height",
    is_active => "IsActive",
    tags => "Tags",
    contact_infos => "ContactInfos",
});

pub const COMPLEX_HEADERS: [&str; 12] = [
    "ID",
    "Name",
    "BirthDate",
    "Height",
    "IsActive",
    "Tags",
    "ContactInfos Email",
    "ContactInfos Phone",
    "ContactInfos Address Street",
    "ContactInfos Address City",
    "ContactInfos Address ZIP",
    "ContactInfos Verified",
];

pub fn parse_custom_id(s: &str) -> Result<CustomId, String> {
    s.strip_prefix("ID-")
        .ok_or_else(|| format!("missing ID- prefix in {s:?}"))?
        .parse::<u32>()
        .map(CustomId)
        .map_err(|e| e.to_string())
}

/// Default registry plus the `ID-%05d` format for [`CustomId`].
pub fn custom_id_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::default();
    registry.register::<CustomId, Infallible, String>(
        |id| Ok(format!("ID-{:05}", id.0)),
        parse_custom_id,
    );
    registry
}

pub fn birth_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()
}

pub fn simple_people() -> Vec<SimpleStruct> {
    vec![
        SimpleStruct {
            name: "Alice".into(),
            age: 30,
            height: 165.5,
            active: true,
        },
        SimpleStruct {
            name: "Bob".into(),
            age: 45,
            height: 180.25,
            active: false,
        },
    ]
}

pub fn primary_contact() -> ContactInfo {
    ContactInfo {
        email: "alice@example.com".into(),
        phone: Some("555-0100".into()),
        address: Some(Address {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            zip: "12345".into(),
        }),
        verified: true,
    }
}

pub fn sample_complex() -> ComplexStruct {
    ComplexStruct {
        id: CustomId(42),
        name: "Alice".into(),
        birth_date: birth_date(),
        height: Some(165.5),
        is_active: true,
        tags: vec!["admin".into(), "ops".into()],
        contact_infos: vec![
            primary_contact(),
            ContactInfo {
                email: "alice@work.example".into(),
                phone: None,
                address: None,
                verified: false,
            },
        ],
        internal_note: "not exported".into(),
    }
}

/// What [`sample_complex`] looks like after an export/import cycle: only the
/// first collection element survives and unexported fields are reset.
pub fn sample_complex_reimported() -> ComplexStruct {
    ComplexStruct {
        tags: vec!["admin".into()],
        contact_infos: vec![primary_contact()],
        internal_note: String::new(),
        ..sample_complex()
    }
}

/// A sparse record: no height, no tags, one contact without phone or address.
pub fn sparse_complex() -> ComplexStruct {
    ComplexStruct {
        id: CustomId(7),
        name: "Bob".into(),
        birth_date: Utc.with_ymd_and_hms(1985, 6, 15, 12, 30, 0).unwrap(),
        height: None,
        is_active: false,
        tags: Vec::new(),
        contact_infos: vec![ContactInfo {
            email: "bob@example.com".into(),
            phone: None,
            address: None,
            verified: true,
        }],
        internal_note: String::new(),
    }
}
