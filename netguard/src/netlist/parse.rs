//! Lenient intake of untrusted netlist JSON.
//!
//! Only the top-level shape is enforced: `components` and `nets` must be
//! arrays. Everything inside them degrades to empty values so that the rule
//! engine reports the problem instead of the parser rejecting the upload.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::schema::{Component, Connection, Net, Netlist, Pin, PinType};

#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("Invalid input shape: `{field}` must be an array, found {found}")]
    InvalidInputShape { field: &'static str, found: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Netlist {
    /// Build a netlist from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, NetlistError> {
        let components = top_level_array(value, "components")?;
        let nets = top_level_array(value, "nets")?;

        Ok(Netlist {
            components: components.iter().map(component_from_value).collect(),
            nets: nets.iter().map(net_from_value).collect(),
        })
    }

    /// Parse netlist JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, NetlistError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for Netlist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Netlist::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn top_level_array<'a>(value: &'a Value, field: &'static str) -> Result<&'a [Value], NetlistError> {
    match value.get(field) {
        Some(Value::Array(items)) => Ok(items),
        other => Err(NetlistError::InvalidInputShape {
            field,
            found: kind_of(other),
        }),
    }
}

fn kind_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

/// Entries of an optional nested array; anything that is not an array is empty.
fn items<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match obj.get(key) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

fn component_from_value(value: &Value) -> Component {
    let Some(obj) = value.as_object() else {
        return Component::default();
    };
    Component {
        id: text(obj, "id"),
        name: text(obj, "name"),
        component_type: text(obj, "type"),
        pins: items(obj, "pins").iter().map(pin_from_value).collect(),
        x: number(obj, "x"),
        y: number(obj, "y"),
    }
}

fn pin_from_value(value: &Value) -> Pin {
    let Some(obj) = value.as_object() else {
        return Pin::default();
    };
    Pin {
        id: text(obj, "id"),
        name: text(obj, "name"),
        pin_type: PinType::from(text(obj, "type")),
    }
}

fn net_from_value(value: &Value) -> Net {
    let Some(obj) = value.as_object() else {
        return Net::default();
    };
    Net {
        id: text(obj, "id"),
        name: text(obj, "name"),
        connections: items(obj, "connections")
            .iter()
            .map(connection_from_value)
            .collect(),
    }
}

fn connection_from_value(value: &Value) -> Connection {
    let Some(obj) = value.as_object() else {
        return Connection::default();
    };
    Connection {
        component_id: text(obj, "componentId"),
        pin_id: text(obj, "pinId"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_array_components() {
        let err = Netlist::from_value(&json!({"components": {}, "nets": []})).unwrap_err();
        match err {
            NetlistError::InvalidInputShape { field, found } => {
                assert_eq!(field, "components");
                assert_eq!(found, "object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_missing_nets() {
        let err = Netlist::from_value(&json!({"components": []})).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::InvalidInputShape { field: "nets", found: "missing" }
        ));
    }

    #[test]
    fn test_rejects_non_object_document() {
        let err = Netlist::from_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::InvalidInputShape { field: "components", .. }
        ));
    }

    #[test]
    fn test_nested_garbage_degrades_to_empty() {
        let netlist = Netlist::from_value(&json!({
            "components": [
                {"id": "U1", "name": "MCU", "type": "IC", "pins": "oops"},
                42,
                {"id": 7, "name": null, "pins": [{"id": 1, "name": "A"}, "junk"]}
            ],
            "nets": [
                {"id": "N1", "name": "GND", "connections": null},
                {"id": "N2", "connections": [{"componentId": "U1"}]}
            ]
        }))
        .unwrap();

        assert_eq!(netlist.components.len(), 3);
        assert!(netlist.components[0].pins.is_empty());
        assert_eq!(netlist.components[1], Component::default());
        assert_eq!(netlist.components[2].id, "7");
        assert_eq!(netlist.components[2].name, "");
        assert_eq!(netlist.components[2].pins[0].id, "1");
        assert_eq!(netlist.components[2].pins[1], Pin::default());

        assert!(netlist.nets[0].connections.is_empty());
        assert_eq!(netlist.nets[1].name, "");
        assert_eq!(netlist.nets[1].connections[0], Connection::new("U1", ""));
    }

    #[test]
    fn test_deserialize_goes_through_lenient_path() {
        let netlist: Netlist = serde_json::from_str(
            r#"{"components":[{"id":"R1","name":"R","type":"resistor","x":1.5}],"nets":[]}"#,
        )
        .unwrap();
        assert_eq!(netlist.components[0].x, Some(1.5));
        assert!(netlist.components[0].pins.is_empty());

        let err = serde_json::from_str::<Netlist>(r#"{"components":"x","nets":[]}"#).unwrap_err();
        assert!(err.to_string().contains("components"));
    }

    #[test]
    fn test_invalid_json_text() {
        assert!(matches!(
            Netlist::from_json_str("{not json"),
            Err(NetlistError::Json(_))
        ));
    }
}
