//! Connectivity view over the netlist using petgraph.
//!
//! Components and nets are both nodes; each resolvable connection adds an
//! edge between its component and its net. Dangling connections are counted
//! but never become edges.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, NodeIndexable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::netlist::{Component, Net};

use super::graph::NetlistGraph;

#[derive(Debug, Clone, Copy)]
pub enum ConnectivityNode<'a> {
    Component(&'a Component),
    Net(&'a Net),
}

impl<'a> ConnectivityNode<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ConnectivityNode::Component(c) => &c.id,
            ConnectivityNode::Net(n) => &n.id,
        }
    }
}

/// Aggregate connectivity figures for a netlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivitySummary {
    pub components: usize,
    pub nets: usize,
    pub connections: usize,
    pub dangling_connections: usize,
    /// Indexed components with no resolvable connection.
    pub unconnected_components: usize,
    /// Connected groups that contain at least one component.
    pub islands: usize,
}

#[derive(Debug)]
pub struct Connectivity<'a> {
    graph: UnGraph<ConnectivityNode<'a>, &'a str>,
    component_nodes: HashMap<&'a str, NodeIndex>,
    net_nodes: HashMap<&'a str, NodeIndex>,
    connections: usize,
    dangling: usize,
}

impl<'a> Connectivity<'a> {
    pub(crate) fn build(model: &NetlistGraph<'a>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut component_nodes = HashMap::new();
        let mut net_nodes = HashMap::new();

        for component in model.components() {
            if component_nodes.contains_key(component.id.as_str()) {
                continue;
            }
            let idx = graph.add_node(ConnectivityNode::Component(component));
            component_nodes.insert(component.id.as_str(), idx);
        }

        let mut connections = 0;
        let mut dangling = 0;
        for net in model.nets() {
            let net_idx = *net_nodes
                .entry(net.id.as_str())
                .or_insert_with(|| graph.add_node(ConnectivityNode::Net(net)));

            for conn in &net.connections {
                connections += 1;
                if !model.resolves(&conn.component_id, &conn.pin_id) {
                    dangling += 1;
                    continue;
                }
                if let Some(&comp_idx) = component_nodes.get(conn.component_id.as_str()) {
                    graph.add_edge(comp_idx, net_idx, conn.pin_id.as_str());
                }
            }
        }

        Self {
            graph,
            component_nodes,
            net_nodes,
            connections,
            dangling,
        }
    }

    /// Neighbour ids of a node, deduplicated, in edge insertion order.
    fn neighbour_ids(&self, idx: NodeIndex) -> Vec<&'a str> {
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|e| e.id());

        let mut seen = indexmap::IndexSet::new();
        for edge in edges {
            let other = if edge.source() == idx {
                edge.target()
            } else {
                edge.source()
            };
            seen.insert(self.graph[other].id());
        }
        seen.into_iter().collect()
    }

    /// Components reachable from a net through resolvable connections.
    pub fn components_on_net(&self, net_id: &str) -> Vec<&'a str> {
        self.net_nodes
            .get(net_id)
            .map(|&idx| self.neighbour_ids(idx))
            .unwrap_or_default()
    }

    /// Nets a component is attached to through resolvable connections.
    pub fn nets_of_component(&self, component_id: &str) -> Vec<&'a str> {
        self.component_nodes
            .get(component_id)
            .map(|&idx| self.neighbour_ids(idx))
            .unwrap_or_default()
    }

    pub fn summary(&self) -> ConnectivitySummary {
        let mut sets = UnionFind::<usize>::new(self.graph.node_bound());
        for edge in self.graph.edge_references() {
            sets.union(
                self.graph.to_index(edge.source()),
                self.graph.to_index(edge.target()),
            );
        }

        let mut islands = std::collections::HashSet::new();
        let mut unconnected = 0;
        for &idx in self.component_nodes.values() {
            islands.insert(sets.find(self.graph.to_index(idx)));
            if self.graph.edges(idx).next().is_none() {
                unconnected += 1;
            }
        }

        ConnectivitySummary {
            components: self.component_nodes.len(),
            nets: self.net_nodes.len(),
            connections: self.connections,
            dangling_connections: self.dangling,
            unconnected_components: unconnected,
            islands: islands.len(),
        }
    }
}
