//! Parameter type hints and their fixed host identities.

use super::OptionValue;
use crate::error::ValidationError;
use uuid::{Uuid, uuid};

/// A named type hint and the identity the host knows it by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeHint {
    /// Alias accepted in metadata.
    pub name: &'static str,
    /// Host identity.
    pub id: Uuid,
}

const fn hint(name: &'static str, id: Uuid) -> TypeHint {
    TypeHint { name, id }
}

/// Every type hint the host recognizes.
pub static TYPE_HINTS: [TypeHint; 27] = [
    hint("none", uuid!("35915213-5534-4277-81b8-1bdc9e7383d2")),
    hint("ghdoc", uuid!("87f87f55-5b71-41f4-8aea-21d494016f81")),
    hint("float", uuid!("39fbc626-7a01-46ab-a18e-ec1c0c41685b")),
    hint("bool", uuid!("d60527f5-b5af-4ef6-8970-5f96fe412559")),
    hint("int", uuid!("48d01794-d3d8-4aef-990e-127168822244")),
    hint("complex", uuid!("309690df-6229-4774-91bb-b1c9c0bfa54d")),
    hint("str", uuid!("37261734-eec7-4f50-b6a8-b8d1f3c4396b")),
    hint("datetime", uuid!("09bcf900-fe83-4efa-8d32-33d89f7a3e66")),
    hint("guid", uuid!("5325b8e1-51d7-4d36-837a-d98394626c35")),
    hint("color", uuid!("24b1d1a3-ab79-498c-9e44-c5b14607c4d3")),
    hint("point", uuid!("e1937b56-b1da-4c12-8bd8-e34ee81746ef")),
    hint("vector", uuid!("15a50725-e3d3-4075-9f7c-142ba5f40747")),
    hint("plane", uuid!("3897522d-58e9-4d60-b38c-978ddacfedd8")),
    hint("interval", uuid!("589748aa-e558-4dd9-976f-78e3ab91fc77")),
    hint("uvinterval", uuid!("74c906f3-db02-4cea-bd58-de375cb5ae73")),
    hint("box", uuid!("f29cb021-de79-4e63-9f04-fc8e0df5f8b6")),
    hint("transform", uuid!("c4b38e4c-21ff-415f-a0d1-406d282428dd")),
    hint("line", uuid!("f802a8cd-e699-4a94-97ea-83b5406271de")),
    hint("circle", uuid!("3c5409a1-3293-4181-a6fa-c24c37fc0c32")),
    hint("arc", uuid!("9c80ec18-b48c-41b0-bc6e-cd93d9c916aa")),
    hint("polyline", uuid!("66fa617b-e3e8-4480-9f1e-2c0688c1d21b")),
    hint("rectangle", uuid!("83da014b-a550-4bf5-89ff-16e54225bd5d")),
    hint("curve", uuid!("9ba89ec2-5315-435f-a621-b66c5fa2f301")),
    hint("mesh", uuid!("794a1f9d-21d5-4379-b987-9e8bbf433912")),
    hint("surface", uuid!("f4070a37-c822-410f-9057-100d2e22a22d")),
    hint("subd", uuid!("20f4ca9c-6c90-4fd6-ba8a-5bf9ca79db08")),
    hint("brep", uuid!("2ceb0405-fdfe-403d-a4d6-8786da45fb9d")),
];

/// Hint used when a parameter declares none.
pub const DEFAULT_TYPE_HINT: &str = "ghdoc";

const FIELD: &str = "typeHintID";

/// Resolves a type hint name or identity string to the host identity.
///
/// Absent or empty values resolve to the `ghdoc` hint. A string that is
/// neither a known name nor the identity of a known hint is rejected.
pub fn resolve_type_hint(value: Option<&OptionValue>) -> Result<Uuid, ValidationError> {
    let token = match value {
        None => DEFAULT_TYPE_HINT,
        Some(OptionValue::Alias(alias)) if alias.trim().is_empty() => DEFAULT_TYPE_HINT,
        Some(OptionValue::Alias(alias)) => alias.trim(),
        Some(code @ OptionValue::Code(_)) => return Err(invalid(&code.to_string())),
    };

    if let Some(hint) = TYPE_HINTS.iter().find(|h| h.name.eq_ignore_ascii_case(token)) {
        return Ok(hint.id);
    }

    match Uuid::parse_str(token) {
        Ok(id) if TYPE_HINTS.iter().any(|h| h.id == id) => Ok(id),
        _ => Err(invalid(&format!("\"{token}\""))),
    }
}

fn invalid(value: &str) -> ValidationError {
    let mut valid: Vec<String> = TYPE_HINTS.iter().map(|h| h.name.to_string()).collect();
    valid.sort();
    ValidationError::InvalidOption {
        field: FIELD.to_string(),
        value: value.to_string(),
        valid,
    }
}
