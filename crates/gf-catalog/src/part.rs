//! Persistent, user-authored parts.

use gf_geometry::Rotation;
use gf_liquids::Liquid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A part placed on the grid by the editing layer.
///
/// These are the authored fields only; everything derived (transitions,
/// flows, liquid) lives in the per-solve snapshot. The solver never
/// mutates a `Part`. Only `Catalog::interact` does, on behalf of a user
/// toggle, and the caller re-solves afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Part type id, resolved against the catalog.
    #[serde(rename = "type")]
    pub type_id: String,
    /// Grid position of the top-left footprint cell.
    pub x: i32,
    pub y: i32,
    /// Authored rotation in degrees (0/90/180/270).
    #[serde(default)]
    pub rotate: i32,
    #[serde(default)]
    pub flipped: bool,
    /// Disabled parts keep their passage but lose their powered behavior.
    #[serde(default)]
    pub disabled: bool,
    /// Closed parts contribute no routes at all.
    #[serde(default)]
    pub closed: bool,
    /// Manual override for the liquid this part supplies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid_source: Option<Liquid>,
    /// Free-form settings interpreted by the part's specification.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
}

impl Part {
    pub fn new(type_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            type_id: type_id.into(),
            x,
            y,
            rotate: 0,
            flipped: false,
            disabled: false,
            closed: false,
            liquid_source: None,
            settings: Map::new(),
        }
    }

    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn with_flipped(mut self) -> Self {
        self.flipped = true;
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees(self.rotate)
    }

    pub fn setting_f64(&self, key: &str) -> Option<f64> {
        self.settings.get(key).and_then(Value::as_f64)
    }

    pub fn setting_bool(&self, key: &str) -> Option<bool> {
        self.settings.get(key).and_then(Value::as_bool)
    }

    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(Value::as_str)
    }

    /// Parse a color-valued setting. Unparseable colors degrade to `None`
    /// with a warning rather than failing the part.
    pub fn setting_color(&self, key: &str) -> Option<Liquid> {
        let raw = self.setting_str(key)?;
        match Liquid::parse(raw) {
            Ok(liquid) => Some(liquid),
            Err(err) => {
                warn!(part = %self.type_id, key, %err, "ignoring invalid color setting");
                None
            }
        }
    }

    /// The liquid this part supplies: the manual override wins over the
    /// configured color.
    pub fn supply_liquid(&self) -> Option<Liquid> {
        self.liquid_source.or_else(|| self.setting_color("color"))
    }
}
