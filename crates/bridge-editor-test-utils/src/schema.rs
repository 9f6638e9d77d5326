use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// A trimmed-down bridge config schema covering every editor section.
///
/// Default document built from it:
/// `{ sendAnalyticsEvents: true, disableLoadingLogo: false, platforms: {},
///    advertisement: { useBuiltInErrorPopup: false,
///      interstitial: { preloadOnStart: false, delay: 60 },
///      rewarded: { preloadOnStart: false } } }`
pub fn bridge_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["sendAnalyticsEvents", "advertisement"],
        "properties": {
            "forciblySetPlatformId": { "type": "string" },
            "sendAnalyticsEvents": { "type": "boolean", "default": true },
            "disableLoadingLogo": { "type": "boolean", "default": false },
            "showFullLoadingLogo": { "type": "boolean" },
            "platforms": {
                "type": "object",
                "properties": {
                    "yandex": {
                        "type": "object",
                        "properties": {
                            "useSignedData": { "type": "boolean", "default": false }
                        }
                    },
                    "game_distribution": {
                        "type": "object",
                        "required": ["gameId"],
                        "properties": { "gameId": { "type": "string" } }
                    },
                    "facebook": {
                        "type": "object",
                        "properties": {
                            "placementId": { "type": "string" },
                            "subscribeForNotificationsOnStart": { "type": "boolean", "default": false }
                        }
                    },
                    "crazy_games": {
                        "type": "object",
                        "required": ["xsollaProjectId"],
                        "properties": {
                            "xsollaProjectId": { "type": "string" },
                            "isSandbox": { "type": "boolean", "default": false },
                            "retries": { "type": "number", "default": 0 },
                            "region": { "type": "string" }
                        }
                    },
                    "playgama": {
                        "type": "object",
                        "required": ["gameId"],
                        "properties": { "gameId": { "type": "string" } }
                    },
                    "not_a_platform": {
                        "type": "object",
                        "properties": { "token": { "type": "string" } }
                    }
                }
            },
            "advertisement": {
                "type": "object",
                "required": ["interstitial", "rewarded"],
                "properties": {
                    "useBuiltInErrorPopup": { "type": "boolean", "default": false },
                    "backfillId": { "type": "string" },
                    "interstitial": { "$ref": "#/definitions/interstitial" },
                    "rewarded": { "$ref": "#/definitions/rewarded" }
                }
            },
            "payments": {
                "type": "array",
                "items": { "$ref": "#/definitions/paymentProduct" }
            },
            "leaderboards": {
                "type": "array",
                "items": { "$ref": "#/definitions/leaderboard" }
            }
        },
        "definitions": {
            "interstitial": {
                "type": "object",
                "properties": {
                    "preloadOnStart": { "type": "boolean", "default": false },
                    "delay": { "type": "number", "default": 60 },
                    "placements": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/placement" }
                    }
                }
            },
            "rewarded": {
                "type": "object",
                "properties": {
                    "preloadOnStart": { "type": "boolean", "default": false },
                    "placements": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/placement" }
                    }
                }
            },
            "placement": {
                "type": "object",
                "required": ["id"],
                "properties": { "id": { "type": "string" } }
            },
            "paymentProduct": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": { "type": "string" },
                    "playgama": {
                        "type": "object",
                        "required": ["amount"],
                        "properties": { "amount": { "type": "number" } }
                    },
                    "yandex": {
                        "type": "object",
                        "properties": { "id": { "type": "string" } }
                    },
                    "facebook": {
                        "type": "object",
                        "required": ["id"],
                        "properties": {
                            "id": { "type": "string" },
                            "description": { "type": "string" }
                        }
                    }
                }
            },
            "leaderboard": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": { "type": "string" },
                    "isMain": { "type": "boolean" },
                    "yandex": { "type": "string" },
                    "facebook": { "type": "string" },
                    "msn": { "type": "string" }
                }
            }
        }
    })
}

/// Root with one required defaulted boolean and one optional string.
pub fn analytics_schema() -> Value {
    json!({
        "type": "object",
        "required": ["sendAnalyticsEvents"],
        "properties": {
            "sendAnalyticsEvents": { "type": "boolean", "default": true },
            "backfillId": { "type": "string" }
        }
    })
}

/// Write a schema document into `dir` and return its path.
pub fn write_schema(dir: &Path, schema: &Value) -> PathBuf {
    let path = dir.join("schema.json");
    let contents = serde_json::to_string_pretty(schema).expect("encode schema");
    fs::write(&path, contents).expect("write schema");
    path
}
