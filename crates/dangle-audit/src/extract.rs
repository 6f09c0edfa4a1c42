//! Record normalization and target extraction.

use dangle_core::{
    normalize_name, AliasValue, ExtractionError, RecordType, RecordValues, ResourceRecordSet,
    Target, ZoneRecord,
};

/// Characters trimmed from literal values
const VALUE_TRIM: &[char] = &[' ', '\n', '\r', '\t'];

/// Longest rendering of an unexpected value kept in an error
const SHAPE_PREVIEW: usize = 80;

/// Normalize a raw record set.
///
/// Names, alias targets and values come out trimmed, without the root dot
/// and in lowercase. Returns `Ok(None)` for record types the audit skips, and an
/// [`ExtractionError`] for A or CNAME records that carry no usable target.
pub fn extract(raw: &ResourceRecordSet) -> Result<Option<ZoneRecord>, ExtractionError> {
    let Some(record_type) = RecordType::parse(&raw.record_type) else {
        return Ok(None);
    };

    let name = normalize_name(&raw.name);

    if let Some(alias) = &raw.alias_target {
        let target = match alias {
            AliasValue::Structured(target) => normalize_name(&target.dns_name),
            AliasValue::Unstructured(other) => {
                return Err(ExtractionError::UnexpectedAliasShape {
                    name,
                    record_type,
                    shape: preview(other),
                });
            }
        };
        if target.is_empty() {
            let shape = serde_json::to_value(alias)
                .map(|v| preview(&v))
                .unwrap_or_default();
            return Err(ExtractionError::UnexpectedAliasShape {
                name,
                record_type,
                shape,
            });
        }
        return Ok(Some(ZoneRecord {
            name,
            record_type,
            alias_target: Some(target),
            values: Vec::new(),
        }));
    }

    let entries = match &raw.resource_records {
        Some(RecordValues::Structured(entries)) if !entries.is_empty() => entries,
        Some(RecordValues::Structured(_)) | None => {
            return Err(ExtractionError::MissingTargets { name, record_type });
        }
        Some(RecordValues::Unstructured(other)) => {
            return Err(ExtractionError::UnexpectedValueShape {
                name,
                record_type,
                shape: preview(other),
            });
        }
    };

    let mut values = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let value = normalize_name(entry.value.trim_matches(VALUE_TRIM));
        if value.is_empty() {
            return Err(ExtractionError::EmptyValue {
                name,
                record_type,
                index,
            });
        }
        values.push(value);
    }

    Ok(Some(ZoneRecord {
        name,
        record_type,
        alias_target: None,
        values,
    }))
}

/// Effective targets of a record, in order.
///
/// An alias is the sole target; otherwise every literal value is one.
#[must_use]
pub fn targets(record: &ZoneRecord) -> Vec<Target> {
    match &record.alias_target {
        Some(alias) => vec![Target::alias(alias.clone())],
        None => record.values.iter().cloned().map(Target::literal).collect(),
    }
}

fn preview(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= SHAPE_PREVIEW {
        rendered
    } else {
        let cut: String = rendered.chars().take(SHAPE_PREVIEW).collect();
        format!("{cut}...")
    }
}
