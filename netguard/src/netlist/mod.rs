//! Netlist model and intake.

pub mod parse;
pub mod sample;
pub mod schema;

pub use parse::NetlistError;
pub use sample::sample_netlist;
pub use schema::*;
