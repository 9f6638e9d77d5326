//! Plain-text and JSON views of the form and platform catalog.

use bridge_editor_core::{
    EditorError, EditorSession, FieldDescriptor, PlatformOption, advertisement_fields, general_fields,
    payment_platform_fields, platform_fields, surface_fields,
};
use bridge_editor_protocol::{AdSurface, format_label};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Form sections in display order, skipping empty ones.
pub fn field_sections(session: &EditorSession) -> Result<Vec<(String, Vec<FieldDescriptor>)>, EditorError> {
    let mut sections = vec![("General".to_string(), general_fields(session)?)];
    for platform in session.added_platforms() {
        sections.push((platform.label(), platform_fields(session, platform)?));
    }
    sections.push(("Advertisement".to_string(), advertisement_fields(session)?));
    for surface in AdSurface::ALL {
        sections.push((
            format!("Advertisement / {}", format_label(surface.as_str())),
            surface_fields(session, surface)?,
        ));
    }
    for index in 0..session.payment_count() {
        for platform in session.payment_platforms(index) {
            sections.push((
                format!("Payment #{index} / {}", platform.label()),
                payment_platform_fields(session, index, platform)?,
            ));
        }
    }
    sections.retain(|(_, fields)| !fields.is_empty());
    Ok(sections)
}

pub fn fields_text(sections: &[(String, Vec<FieldDescriptor>)]) -> String {
    let mut out = String::new();
    for (title, fields) in sections {
        let _ = writeln!(out, "{title}");
        for field in fields {
            let _ = writeln!(
                out,
                "  {:<32} {:<12} {}  ({})",
                field.display_label(),
                format!("{:?}", field.kind).to_lowercase(),
                field.value,
                field.path
            );
        }
    }
    out
}

pub fn fields_json(sections: &[(String, Vec<FieldDescriptor>)]) -> serde_json::Result<Value> {
    let mut map = Map::new();
    for (title, fields) in sections {
        map.insert(title.clone(), serde_json::to_value(fields)?);
    }
    Ok(Value::Object(map))
}

pub fn options_text(options: &[PlatformOption]) -> String {
    if options.is_empty() {
        return "no platforms found\n".to_string();
    }
    let mut out = String::new();
    for option in options {
        let status = if option.added {
            "already added".to_string()
        } else {
            option.summary.clone().unwrap_or_default()
        };
        let _ = writeln!(
            out,
            "{:<20} {:<20} {status}",
            option.platform.as_str(),
            option.label
        );
    }
    out
}
