//! Built-in sample netlist, handy as a starting template for uploads.

use super::schema::{Component, Net, Netlist, Pin, PinType};

fn two_pin(id: &str, name: &str, component_type: &str, pin_names: [&str; 2]) -> Component {
    Component::new(id, name)
        .with_type(component_type)
        .with_pin(Pin::new("1", pin_names[0]).with_type(PinType::Bidirectional))
        .with_pin(Pin::new("2", pin_names[1]).with_type(PinType::Bidirectional))
}

/// A small IC + connector design with one deliberate mistake: the connector
/// is not tied to GND.
pub fn sample_netlist() -> Netlist {
    let ic = Component::new("IC1", "MY_IC")
        .with_type("IC")
        .with_pin(Pin::new("1", "VCC").with_type(PinType::Power))
        .with_pin(Pin::new("2", "GND").with_type(PinType::Ground))
        .with_pin(Pin::new("3", "OUT1").with_type(PinType::Output))
        .with_pin(Pin::new("4", "IN1").with_type(PinType::Input));

    let components = vec![
        ic,
        two_pin("CONN1", "MY_CONNECTOR", "CONNECTOR", ["PIN1", "PIN2"]),
        two_pin("COMP1", "MY_COMP_01", "COMPONENT", ["P1", "P2"]),
        two_pin("COMP2", "MY_COMP_02", "COMPONENT", ["P1", "P2"]),
    ];

    let nets = vec![
        Net::new("NET1", "VCC")
            .with_connection("IC1", "1")
            .with_connection("CONN1", "1"),
        Net::new("NET2", "GND")
            .with_connection("IC1", "2")
            .with_connection("COMP1", "2")
            .with_connection("COMP2", "2"),
        Net::new("NET3", "SIGNAL1")
            .with_connection("IC1", "3")
            .with_connection("COMP1", "1"),
        Net::new("NET4", "SIGNAL2").with_connection("COMP2", "1"),
    ];

    Netlist::new(components, nets)
}
