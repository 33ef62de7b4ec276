//! Shape validation for raw dump records
//!
//! Every parser here fails the whole record on the first shape violation;
//! the caller turns that into a counted skip.

use crate::model::{
    ClassEntity, EnumEntity, EnumValue, FunctionEntity, Member, OffsetEntity, Param, TypeCategory,
    TypeDescriptor,
};
use serde_json::Value;
use std::collections::BTreeSet;

/// Synthetic member carrying the ancestor chain
pub const INHERIT_INFO_KEY: &str = "__InheritInfo";
/// Synthetic member carrying the class size
pub const CLASS_SIZE_KEY: &str = "__MDKClassSize";

const DEFAULT_ENUM_TYPE: &str = "uint8";

/// Why a record was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed(pub String);

impl Malformed {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

pub type RecordResult<T> = Result<T, Malformed>;

/// `[baseName, category, modifier, [templateArgs]]`
pub fn parse_type(value: &Value) -> RecordResult<TypeDescriptor> {
    match value {
        Value::String(name) => Ok(TypeDescriptor::named(name.clone(), TypeCategory::Unknown)),
        Value::Array(parts) if parts.is_empty() => Ok(TypeDescriptor::unknown()),
        Value::Array(parts) => {
            let base_name = parts[0]
                .as_str()
                .ok_or_else(|| Malformed::new("type name is not a string"))?;
            let category_marker = parts.get(1).and_then(Value::as_str).unwrap_or("");
            let modifier = parts.get(2).and_then(Value::as_str).unwrap_or("");

            let template_args = match parts.get(3) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(args)) => {
                    args.iter().map(parse_type).collect::<RecordResult<_>>()?
                }
                Some(_) => return Err(Malformed::new("template arguments are not an array")),
            };

            Ok(TypeDescriptor {
                base_name: base_name.to_string(),
                category: TypeCategory::from_marker(category_marker),
                pointer: modifier == "*" || category_marker == "*",
                template_args,
            })
        }
        _ => Err(Malformed::new("type descriptor is not an array")),
    }
}

/// Non-negative integer, accepting `0x`-prefixed hex strings
pub fn parse_u64(value: &Value, field: &str) -> RecordResult<u64> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else if let Some(f) = n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0) {
                Ok(f as u64)
            } else {
                Err(Malformed(format!("{} must be a non-negative integer", field)))
            }
        }
        Value::String(s) => {
            let s = s.trim();
            let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => s.parse::<u64>(),
            };
            parsed.map_err(|_| Malformed(format!("{} '{}' is not a valid offset", field, s)))
        }
        _ => Err(Malformed(format!("{} is missing or not a number", field))),
    }
}

fn parse_i64(value: &Value, field: &str) -> RecordResult<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().and_then(|v| i64::try_from(v).ok()))
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| Malformed(format!("{} is not an integer", field)))
}

fn expect_array<'a>(value: &'a Value, what: &str) -> RecordResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Malformed(format!("{} payload is not an array", what)))
}

/// `[type, offset, size]`
pub fn parse_member(name: &str, value: &Value) -> RecordResult<Member> {
    let parts = expect_array(value, "member")?;
    if parts.len() < 2 {
        return Err(Malformed(format!(
            "member '{}' has {} fields, expected at least 2",
            name,
            parts.len()
        )));
    }

    Ok(Member {
        name: name.to_string(),
        ty: parse_type(&parts[0])?,
        offset: parse_u64(&parts[1], "member offset")?,
        size: parts
            .get(2)
            .filter(|v| !v.is_null())
            .map(|v| parse_u64(v, "member size"))
            .transpose()?
            .unwrap_or(0),
    })
}

/// `[ {member: [...]}, {"__InheritInfo": [...]}, {"__MDKClassSize": n} ]`
pub fn parse_class(name: &str, payload: &Value) -> RecordResult<ClassEntity> {
    let entries = expect_array(payload, "class")?;
    let mut members = Vec::new();
    let mut direct_ancestors: Vec<String> = Vec::new();

    for entry in entries {
        let object = entry
            .as_object()
            .ok_or_else(|| Malformed::new("class entry is not an object"))?;

        for (key, value) in object {
            match key.as_str() {
                INHERIT_INFO_KEY => {
                    for ancestor in expect_array(value, "inheritance")? {
                        let ancestor = ancestor
                            .as_str()
                            .ok_or_else(|| Malformed::new("ancestor name is not a string"))?;
                        if !ancestor.is_empty()
                            && !ancestor.eq_ignore_ascii_case(name)
                            && !direct_ancestors.iter().any(|a| a.eq_ignore_ascii_case(ancestor))
                        {
                            direct_ancestors.push(ancestor.to_string());
                        }
                    }
                }
                CLASS_SIZE_KEY => {}
                member_name => members.push(parse_member(member_name, value)?),
            }
        }
    }

    Ok(ClassEntity {
        name: name.to_string(),
        members,
        direct_ancestors,
    })
}

/// `[returnType, [[type, modifier, name], ...], offset, flags]`
pub fn parse_function(owner: &str, name: &str, value: &Value) -> RecordResult<FunctionEntity> {
    let parts = expect_array(value, "function")?;
    if parts.len() < 3 {
        return Err(Malformed(format!(
            "function '{}::{}' has {} fields, expected at least 3",
            owner,
            name,
            parts.len()
        )));
    }

    let mut params = Vec::new();
    for param in expect_array(&parts[1], "parameter list")? {
        let fields = expect_array(param, "parameter")?;
        if fields.len() < 3 {
            return Err(Malformed(format!(
                "parameter of '{}::{}' has {} fields, expected 3",
                owner,
                name,
                fields.len()
            )));
        }
        params.push(Param {
            ty: parse_type(&fields[0])?,
            name: fields[2].as_str().unwrap_or_default().to_string(),
        });
    }

    Ok(FunctionEntity {
        owning_class: owner.to_string(),
        func_name: name.to_string(),
        return_type: parse_type(&parts[0])?,
        params,
        offset: parse_u64(&parts[2], "function offset")?,
        flags: parse_flags(parts.get(3))?,
    })
}

fn parse_flags(value: Option<&Value>) -> RecordResult<BTreeSet<String>> {
    let split = |s: &str| -> BTreeSet<String> {
        s.split('|')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    };

    match value {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::String(s)) => Ok(split(s)),
        Some(Value::Array(items)) => {
            let mut flags = BTreeSet::new();
            for item in items {
                let flag = item
                    .as_str()
                    .ok_or_else(|| Malformed::new("function flag is not a string"))?;
                flags.extend(split(flag));
            }
            Ok(flags)
        }
        Some(_) => Err(Malformed::new("function flags are neither a string nor a list")),
    }
}

/// `[ [ {Value: n}, ... ], "underlying" ]`
pub fn parse_enum(name: &str, payload: &Value) -> RecordResult<EnumEntity> {
    let parts = expect_array(payload, "enum")?;
    let raw_values = parts
        .first()
        .ok_or_else(|| Malformed(format!("enum '{}' has no value list", name)))?;

    let mut values = Vec::new();
    for entry in expect_array(raw_values, "enum value list")? {
        let object = entry
            .as_object()
            .ok_or_else(|| Malformed::new("enum value is not an object"))?;
        for (value_name, value) in object {
            values.push(EnumValue {
                name: value_name.clone(),
                value: parse_i64(value, "enum value")?,
            });
        }
    }

    let underlying_type = parts
        .get(1)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENUM_TYPE)
        .to_string();

    Ok(EnumEntity {
        name: name.to_string(),
        underlying_type,
        values,
    })
}

/// `[name, value]`
pub fn parse_offset(value: &Value) -> RecordResult<OffsetEntity> {
    let parts = expect_array(value, "offset")?;
    if parts.len() < 2 {
        return Err(Malformed(format!(
            "offset has {} fields, expected 2",
            parts.len()
        )));
    }
    let name = parts[0]
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Malformed::new("offset name is not a string"))?;

    Ok(OffsetEntity {
        name: name.to_string(),
        value: parse_u64(&parts[1], "offset value")?,
    })
}
