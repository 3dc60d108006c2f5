// Adapters layer: concrete implementations for external systems (input
// framing, destination transport, validation rules).

pub mod delimited;
pub mod fixed_width;
pub mod http_destination;
pub mod line_reader;
pub mod rules;
