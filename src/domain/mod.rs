// Domain layer: record model, schema metadata, and ports (interfaces).

pub mod model;
pub mod ports;
pub mod schema;
