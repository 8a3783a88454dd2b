//! Netlist data types.
//!
//! These mirror the JSON document users upload: a list of components (each
//! with its pins) and a list of nets (each with its pin connections). Field
//! names on the wire are camelCase (`componentId`, `pinId`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Electrical role of a pin.
///
/// The rule engine never inspects pin types, so unknown strings from
/// untrusted input are kept verbatim in [`PinType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PinType {
    Input,
    Output,
    Power,
    Ground,
    Bidirectional,
    Other(String),
}

impl PinType {
    pub fn as_str(&self) -> &str {
        match self {
            PinType::Input => "input",
            PinType::Output => "output",
            PinType::Power => "power",
            PinType::Ground => "ground",
            PinType::Bidirectional => "bidirectional",
            PinType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PinType::Other(_))
    }
}

impl Default for PinType {
    fn default() -> Self {
        PinType::Other(String::new())
    }
}

impl From<&str> for PinType {
    fn from(s: &str) -> Self {
        match s {
            "input" => PinType::Input,
            "output" => PinType::Output,
            "power" => PinType::Power,
            "ground" => PinType::Ground,
            "bidirectional" => PinType::Bidirectional,
            other => PinType::Other(other.to_string()),
        }
    }
}

impl From<String> for PinType {
    fn from(s: String) -> Self {
        PinType::from(s.as_str())
    }
}

impl From<PinType> for String {
    fn from(t: PinType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for PinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal on a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pin_type: PinType,
}

impl Pin {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pin_type: PinType::default(),
        }
    }

    pub fn with_type(mut self, pin_type: PinType) -> Self {
        self.pin_type = pin_type;
        self
    }
}

/// A circuit element (IC, resistor, connector, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    /// Free-form type string, e.g. `"IC"`, `"CONNECTOR"`, `"resistor"`.
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub pins: Vec<Pin>,
    /// Layout coordinates; carried through, never inspected by the rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Component {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = component_type.into();
        self
    }

    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

/// Reference from a net to one pin of one component.
///
/// This is a lookup key, not ownership: either id may point at nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub component_id: String,
    pub pin_id: String,
}

impl Connection {
    pub fn new(component_id: impl Into<String>, pin_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            pin_id: pin_id.into(),
        }
    }
}

/// A named electrical node joining one or more pins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Net {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connections: Vec::new(),
        }
    }

    pub fn with_connection(mut self, component_id: &str, pin_id: &str) -> Self {
        self.connections.push(Connection::new(component_id, pin_id));
        self
    }

    pub fn add_connection(&mut self, component_id: &str, pin_id: &str) {
        self.connections.push(Connection::new(component_id, pin_id));
    }

    /// Whether the name matches `gnd` or `ground`, ignoring case.
    pub fn is_ground(&self) -> bool {
        let name = self.name.to_lowercase();
        name == "gnd" || name == "ground"
    }
}

/// The full submitted document: components and nets.
///
/// `Deserialize` goes through [`Netlist::from_value`], so malformed entries
/// inside the two top-level arrays are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Netlist {
    pub components: Vec<Component>,
    pub nets: Vec<Net>,
}

impl Netlist {
    pub fn new(components: Vec<Component>, nets: Vec<Net>) -> Self {
        Self { components, nets }
    }

    pub fn connection_count(&self) -> usize {
        self.nets.iter().map(|n| n.connections.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_type_round_trips_known_and_unknown() {
        let pin: Pin = serde_json::from_str(r#"{"id":"1","name":"VCC","type":"power"}"#).unwrap();
        assert_eq!(pin.pin_type, PinType::Power);

        let pin: Pin = serde_json::from_str(r#"{"id":"1","name":"X","type":"analog"}"#).unwrap();
        assert_eq!(pin.pin_type, PinType::Other("analog".to_string()));
        assert!(!pin.pin_type.is_known());
        assert_eq!(
            serde_json::to_value(&pin).unwrap()["type"],
            serde_json::json!("analog")
        );
    }

    #[test]
    fn test_connection_uses_camel_case() {
        let json = serde_json::to_value(Connection::new("U1", "3")).unwrap();
        assert_eq!(json, serde_json::json!({"componentId": "U1", "pinId": "3"}));
    }

    #[test]
    fn test_component_omits_missing_coordinates() {
        let json = serde_json::to_value(Component::new("R1", "10k").with_type("resistor")).unwrap();
        assert!(json.get("x").is_none());
        assert_eq!(json["type"], "resistor");

        let placed = serde_json::to_value(Component::new("R1", "10k").with_position(12.5, -3.0)).unwrap();
        assert_eq!(placed["x"], 12.5);
        assert_eq!(placed["y"], -3.0);
    }

    #[test]
    fn test_ground_name_matching() {
        assert!(Net::new("N1", "GND").is_ground());
        assert!(Net::new("N1", "Ground").is_ground());
        assert!(!Net::new("N1", "AGND").is_ground());
        assert!(!Net::new("N1", " gnd").is_ground());
    }
}
