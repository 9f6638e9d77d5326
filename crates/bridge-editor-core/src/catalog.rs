//! Platform selector options for each place a platform can be added.

use crate::error::EditorError;
use crate::session::{ID_KEY, IS_MAIN_KEY, LEADERBOARDS_KEY, PAYMENTS_KEY, PLATFORMS_KEY, item_schema};
use crate::EditorSession;
use bridge_editor_protocol::{AdSurface, Platform, format_label};
use bridge_editor_schema::{SchemaNode, resolve};
use serde::Serialize;

/// Number of setting labels listed before `+N more`.
const SUMMARY_FIELDS: usize = 3;

/// Where the selected platform would be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    Platforms,
    Payment(usize),
    Leaderboard(usize),
    Placement(AdSurface, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformOption {
    pub platform: Platform,
    pub label: String,
    /// Already present in the scope; selecting it again is a no-op.
    pub added: bool,
    /// Short description of the settings the platform brings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Selectable platforms for `scope` whose label or id matches `filter`.
///
/// Candidates come from the schema, except placement overrides which offer
/// every known platform. Schema keys that are not platform ids are skipped.
pub fn platform_options(
    session: &EditorSession,
    scope: CatalogScope,
    filter: &str,
) -> Result<Vec<PlatformOption>, EditorError> {
    let schema = session.schema();
    let (candidates, added) = match scope {
        CatalogScope::Platforms => {
            let candidates = match schema.property(PLATFORMS_KEY)? {
                Some(section) => section.properties(),
                None => Vec::new(),
            };
            (candidates, session.added_platforms())
        }
        CatalogScope::Payment(index) => (
            item_schema(schema, PAYMENTS_KEY)?.properties(),
            session.payment_platforms(index),
        ),
        CatalogScope::Leaderboard(index) => (
            item_schema(schema, LEADERBOARDS_KEY)?.properties(),
            session.leaderboard_platforms(index),
        ),
        CatalogScope::Placement(surface, index) => {
            let added = session.placement_overrides(surface, index);
            return Ok(Platform::ALL
                .into_iter()
                .filter(|platform| platform.matches_filter(filter))
                .map(|platform| PlatformOption {
                    platform,
                    label: platform.label(),
                    added: added.contains(&platform),
                    summary: None,
                })
                .collect());
        }
    };

    let mut options = Vec::new();
    for (key, node) in candidates {
        if key == ID_KEY || key == IS_MAIN_KEY {
            continue;
        }
        let Ok(platform) = key.parse::<Platform>() else {
            continue;
        };
        if !platform.matches_filter(filter) {
            continue;
        }
        let summary = match scope {
            CatalogScope::Platforms => settings_summary(resolve(node, schema)?),
            CatalogScope::Payment(_) => fields_summary(resolve(node, schema)?),
            _ => None,
        };
        options.push(PlatformOption {
            platform,
            label: platform.label(),
            added: added.contains(&platform),
            summary,
        });
    }
    Ok(options)
}

/// `Settings: A, B, C, +N more`
fn settings_summary(node: SchemaNode<'_>) -> Option<String> {
    let names: Vec<&str> = node.properties().into_iter().map(|(name, _)| name).collect();
    if names.is_empty() {
        return None;
    }
    let mut summary = names
        .iter()
        .take(SUMMARY_FIELDS)
        .map(|name| format_label(name))
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > SUMMARY_FIELDS {
        summary.push_str(&format!(", +{} more", names.len() - SUMMARY_FIELDS));
    }
    Some(format!("Settings: {summary}"))
}

/// `Fields: A *, B`
fn fields_summary(node: SchemaNode<'_>) -> Option<String> {
    let fields: Vec<String> = node
        .properties()
        .into_iter()
        .map(|(name, _)| {
            if node.is_required(name) {
                format!("{} *", format_label(name))
            } else {
                format_label(name)
            }
        })
        .collect();
    if fields.is_empty() {
        None
    } else {
        Some(format!("Fields: {}", fields.join(", ")))
    }
}
