//! Renderer-agnostic form description derived from the schema.
//!
//! Each section lists the scalar properties of one schema object together
//! with the value currently shown for them. Nested objects and sequences are
//! edited through the entity operations on [`EditorSession`] instead.

use crate::error::EditorError;
use crate::session::{ADVERTISEMENT_KEY, PAYMENTS_KEY, PLACEMENTS_KEY, PLATFORMS_KEY, item_schema};
use crate::EditorSession;
use bridge_editor_protocol::{AdSurface, FieldPath, PathSegment, Platform, format_label};
use bridge_editor_schema::{SchemaNode, SchemaType, build_default, resolve};
use serde::Serialize;
use serde_json::{Number, Value};

/// Input control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Toggle,
    Text,
    Number,
    /// Number whose blank, unparseable or zero input clears the field.
    OptionalNumber,
    /// Text field restricted to the known platform ids.
    PlatformSelect,
}

impl FieldKind {
    /// Control for a scalar schema node; `None` for anything else.
    pub fn for_node(node: SchemaNode<'_>) -> Option<Self> {
        match node.schema_type()? {
            SchemaType::Boolean => Some(Self::Toggle),
            SchemaType::String => Some(Self::Text),
            SchemaType::Number => Some(Self::Number),
            SchemaType::Object | SchemaType::Array => None,
        }
    }

    /// Control for the field at `path` described by `node`.
    ///
    /// Numbers inside payment products clear on empty input instead of
    /// storing `0`.
    pub fn for_path(path: &FieldPath, node: SchemaNode<'_>) -> Option<Self> {
        let kind = Self::for_node(node)?;
        let in_payment = matches!(
            path.segments().first(),
            Some(PathSegment::Field(section)) if section == PAYMENTS_KEY
        );
        Some(match kind {
            Self::Number if in_payment => Self::OptionalNumber,
            other => other,
        })
    }

    /// Convert raw text input into the value stored for this control.
    ///
    /// Returns `None` when a toggle receives something that is not a
    /// recognizable boolean. For [`FieldKind::Number`] input that fails to
    /// parse becomes `0`; [`FieldKind::OptionalNumber`] yields `null` for
    /// that and for zero, which clears the field.
    pub fn parse_input(self, input: &str) -> Option<Value> {
        let trimmed = input.trim();
        match self {
            Self::Toggle => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Some(Value::Bool(false)),
                _ => None,
            },
            Self::Number => Some(number_value(parse_number(trimmed).unwrap_or(0.0))),
            Self::OptionalNumber => Some(
                parse_number(trimmed)
                    .filter(|number| *number != 0.0)
                    .map_or(Value::Null, number_value),
            ),
            Self::Text | Self::PlatformSelect => Some(Value::String(input.to_string())),
        }
    }
}

fn parse_number(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Whole numbers are kept integral so `60` does not turn into `60.0`.
fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        Value::Number(Number::from(number as i64))
    } else {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

/// Top-level settings shown in the general section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralField {
    ForciblySetPlatformId,
    SendAnalyticsEvents,
    DisableLoadingLogo,
    ShowFullLoadingLogo,
}

impl GeneralField {
    pub const ALL: [GeneralField; 4] = [
        GeneralField::ForciblySetPlatformId,
        GeneralField::SendAnalyticsEvents,
        GeneralField::DisableLoadingLogo,
        GeneralField::ShowFullLoadingLogo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GeneralField::ForciblySetPlatformId => "forciblySetPlatformId",
            GeneralField::SendAnalyticsEvents => "sendAnalyticsEvents",
            GeneralField::DisableLoadingLogo => "disableLoadingLogo",
            GeneralField::ShowFullLoadingLogo => "showFullLoadingLogo",
        }
    }
}

/// One editable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Absolute path in the configuration document.
    pub path: FieldPath,
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Stored value, or the schema default when nothing is stored.
    pub value: Value,
}

impl FieldDescriptor {
    /// Label with a trailing ` *` for required fields.
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Fields of the general section that the schema declares.
pub fn general_fields(session: &EditorSession) -> Result<Vec<FieldDescriptor>, EditorError> {
    let schema = session.schema();
    let mut fields = Vec::new();
    for field in GeneralField::ALL {
        let Some(node) = schema.property(field.key())? else {
            continue;
        };
        let kind = match field {
            GeneralField::ForciblySetPlatformId => FieldKind::PlatformSelect,
            _ => match FieldKind::for_node(node) {
                Some(kind) => kind,
                None => continue,
            },
        };
        let path = FieldPath::root().field(field.key());
        fields.push(describe(session, path, field.key(), node, kind, false)?);
    }
    Ok(fields)
}

/// Settings of an added platform; empty when the platform is not added.
pub fn platform_fields(session: &EditorSession, platform: Platform) -> Result<Vec<FieldDescriptor>, EditorError> {
    if !session.added_platforms().contains(&platform) {
        return Ok(Vec::new());
    }
    let Some(section) = session.schema().property(PLATFORMS_KEY)? else {
        return Ok(Vec::new());
    };
    let Some(node) = section.property(platform.as_str()) else {
        return Ok(Vec::new());
    };
    let base = FieldPath::root().field(PLATFORMS_KEY).field(platform.as_str());
    object_fields(session, &base, node, &[], true)
}

/// Advertisement settings other than the per-surface sections.
pub fn advertisement_fields(session: &EditorSession) -> Result<Vec<FieldDescriptor>, EditorError> {
    let Some(node) = session.schema().property(ADVERTISEMENT_KEY)? else {
        return Ok(Vec::new());
    };
    let surfaces = AdSurface::ALL.map(AdSurface::as_str);
    object_fields(session, &FieldPath::root().field(ADVERTISEMENT_KEY), node, &surfaces, false)
}

/// Settings of one ad surface other than its placements.
pub fn surface_fields(session: &EditorSession, surface: AdSurface) -> Result<Vec<FieldDescriptor>, EditorError> {
    let schema = session.schema();
    let Some(advertisement) = schema.property(ADVERTISEMENT_KEY)? else {
        return Ok(Vec::new());
    };
    let Some(node) = advertisement.property(surface.as_str()) else {
        return Ok(Vec::new());
    };
    let node = resolve(node, schema)?;
    let base = FieldPath::root().field(ADVERTISEMENT_KEY).field(surface.as_str());
    object_fields(session, &base, node, &[PLACEMENTS_KEY], false)
}

/// Fields of `platform` within payment `index`; empty when not configured.
pub fn payment_platform_fields(
    session: &EditorSession,
    index: usize,
    platform: Platform,
) -> Result<Vec<FieldDescriptor>, EditorError> {
    if !session.payment_platforms(index).contains(&platform) {
        return Ok(Vec::new());
    }
    let item = item_schema(session.schema(), PAYMENTS_KEY)?;
    let Some(node) = item.property(platform.as_str()) else {
        return Ok(Vec::new());
    };
    let base = FieldPath::root()
        .field(PAYMENTS_KEY)
        .index(index)
        .field(platform.as_str());
    object_fields(session, &base, node, &[], true)
}

fn object_fields(
    session: &EditorSession,
    base: &FieldPath,
    node: SchemaNode<'_>,
    skip: &[&str],
    mark_required: bool,
) -> Result<Vec<FieldDescriptor>, EditorError> {
    let node = resolve(node, session.schema())?;
    let mut fields = Vec::new();
    for (name, property) in node.properties() {
        if skip.contains(&name) {
            continue;
        }
        let property = resolve(property, session.schema())?;
        let path = base.clone().field(name);
        let Some(kind) = FieldKind::for_path(&path, property) else {
            continue;
        };
        let required = mark_required && node.is_required(name);
        fields.push(describe(session, path, name, property, kind, required)?);
    }
    Ok(fields)
}

fn describe(
    session: &EditorSession,
    path: FieldPath,
    name: &str,
    node: SchemaNode<'_>,
    kind: FieldKind,
    required: bool,
) -> Result<FieldDescriptor, EditorError> {
    let value = match session.value_at(&path) {
        Some(value) => value.clone(),
        None => build_default(node, session.schema())?,
    };
    Ok(FieldDescriptor {
        path,
        name: name.to_string(),
        label: format_label(name),
        kind,
        required,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_editor_schema::Schema;
    use bridge_editor_test_utils::{analytics_schema, bridge_schema};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> EditorSession {
        EditorSession::new(Schema::from_value(bridge_schema()).expect("schema")).expect("session")
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<String> {
        fields.iter().map(FieldDescriptor::display_label).collect()
    }

    #[test]
    fn parse_input_per_kind() {
        assert_eq!(FieldKind::Toggle.parse_input("Yes"), Some(json!(true)));
        assert_eq!(FieldKind::Toggle.parse_input("off"), Some(json!(false)));
        assert_eq!(FieldKind::Toggle.parse_input("maybe"), None);
        assert_eq!(FieldKind::Number.parse_input("30"), Some(json!(30)));
        assert_eq!(FieldKind::Number.parse_input("2.5"), Some(json!(2.5)));
        assert_eq!(FieldKind::Number.parse_input("abc"), Some(json!(0)));
        assert_eq!(FieldKind::Number.parse_input(""), Some(json!(0)));
        assert_eq!(FieldKind::OptionalNumber.parse_input("100"), Some(json!(100)));
        assert_eq!(FieldKind::OptionalNumber.parse_input(""), Some(Value::Null));
        assert_eq!(FieldKind::OptionalNumber.parse_input("abc"), Some(Value::Null));
        assert_eq!(FieldKind::OptionalNumber.parse_input("0"), Some(Value::Null));
        assert_eq!(FieldKind::Text.parse_input(" id "), Some(json!(" id ")));
        assert_eq!(FieldKind::PlatformSelect.parse_input("yandex"), Some(json!("yandex")));
    }

    #[test]
    fn general_section_follows_fixed_order() {
        let fields = general_fields(&session()).expect("fields");
        assert_eq!(
            names(&fields),
            vec![
                "Forcibly Set Platform Id",
                "Send Analytics Events",
                "Disable Loading Logo",
                "Show Full Loading Logo"
            ]
        );
        assert_eq!(fields[0].kind, FieldKind::PlatformSelect);
        assert_eq!(fields[0].value, json!(""));
        assert_eq!(fields[1].value, json!(true));
        assert_eq!(fields[3].value, json!(false));
    }

    #[test]
    fn general_section_skips_undeclared_fields() {
        let session = EditorSession::new(Schema::from_value(analytics_schema()).expect("schema"))
            .expect("session");
        let fields = general_fields(&session).expect("fields");
        assert_eq!(names(&fields), vec!["Send Analytics Events"]);
    }

    #[test]
    fn platform_section_marks_required_fields() {
        let mut session = session();
        assert!(platform_fields(&session, Platform::CrazyGames).expect("fields").is_empty());

        session.add_platform(Platform::CrazyGames).expect("add");
        let fields = platform_fields(&session, Platform::CrazyGames).expect("fields");
        assert_eq!(
            names(&fields),
            vec!["Xsolla Project Id *", "Is Sandbox", "Retries", "Region"]
        );
        assert_eq!(fields[3].path.to_string(), "platforms.crazy_games.region");
        assert_eq!(fields[3].value, json!(""));
    }

    #[test]
    fn advertisement_sections_skip_nested_parts() {
        let session = session();
        let fields = advertisement_fields(&session).expect("fields");
        assert_eq!(names(&fields), vec!["Use Built In Error Popup", "Backfill Id"]);

        let fields = surface_fields(&session, AdSurface::Interstitial).expect("fields");
        assert_eq!(names(&fields), vec!["Preload On Start", "Delay"]);
        assert_eq!(fields[1].value, json!(60));
    }

    #[test]
    fn payment_platform_fields_use_nested_paths() {
        let mut session = session();
        session.add_payment().expect("payment");
        session.add_payment_platform(0, Platform::Facebook).expect("facebook");

        let fields = payment_platform_fields(&session, 0, Platform::Facebook).expect("fields");
        assert_eq!(names(&fields), vec!["Id *", "Description"]);
        assert_eq!(fields[1].path.to_string(), "payments.0.facebook.description");
        assert!(payment_platform_fields(&session, 0, Platform::Yandex).expect("fields").is_empty());
    }

    #[test]
    fn payment_numbers_clear_instead_of_storing_zero() {
        let mut session = session();
        session.add_payment().expect("payment");
        session.add_payment_platform(0, Platform::Playgama).expect("playgama");

        let fields = payment_platform_fields(&session, 0, Platform::Playgama).expect("fields");
        assert_eq!(fields[0].kind, FieldKind::OptionalNumber);

        let delay = surface_fields(&session, AdSurface::Interstitial).expect("fields");
        assert_eq!(delay[1].kind, FieldKind::Number);
    }
}
