//! Netlist Graph Model
//!
//! Lookup indices built once per validation call over a borrowed
//! [`Netlist`]. The model never mutates and is dropped with the call that
//! built it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::netlist::{Component, Net, Netlist, Pin};

use super::connectivity::Connectivity;

/// Read-only view of a netlist with O(1) component and pin lookup.
///
/// Duplicate ids resolve to the first occurrence. A component that loses to
/// an earlier duplicate contributes none of its pins to the pin index.
#[derive(Debug)]
pub struct NetlistGraph<'a> {
    netlist: &'a Netlist,
    components: HashMap<&'a str, &'a Component>,
    pins: HashMap<(&'a str, &'a str), &'a Pin>,
}

impl<'a> NetlistGraph<'a> {
    pub fn build(netlist: &'a Netlist) -> Self {
        let pin_total: usize = netlist.components.iter().map(|c| c.pins.len()).sum();
        let mut components = HashMap::with_capacity(netlist.components.len());
        let mut pins = HashMap::with_capacity(pin_total);

        for component in &netlist.components {
            match components.entry(component.id.as_str()) {
                Entry::Occupied(_) => {
                    tracing::debug!("Duplicate component id {:?} ignored for lookups", component.id);
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(component);
                }
            }
            for pin in &component.pins {
                pins.entry((component.id.as_str(), pin.id.as_str()))
                    .or_insert(pin);
            }
        }

        Self {
            netlist,
            components,
            pins,
        }
    }

    /// All components in input order, duplicates included.
    pub fn components(&self) -> &'a [Component] {
        &self.netlist.components
    }

    /// All nets in input order, duplicates included.
    pub fn nets(&self) -> &'a [Net] {
        &self.netlist.nets
    }

    pub fn component_by_id(&self, id: &str) -> Option<&'a Component> {
        self.components.get(id).copied()
    }

    pub fn pin(&self, component_id: &str, pin_id: &str) -> Option<&'a Pin> {
        self.pins.get(&(component_id, pin_id)).copied()
    }

    /// Whether both ends of a connection resolve.
    pub fn resolves(&self, component_id: &str, pin_id: &str) -> bool {
        self.pin(component_id, pin_id).is_some()
    }

    /// First net, in input order, named `gnd` or `ground` (any case).
    pub fn ground_net(&self) -> Option<&'a Net> {
        self.netlist.nets.iter().find(|net| net.is_ground())
    }

    /// Number of distinct component ids visible to lookups.
    pub fn indexed_components(&self) -> usize {
        self.components.len()
    }

    pub fn connectivity(&self) -> Connectivity<'a> {
        Connectivity::build(self)
    }
}
