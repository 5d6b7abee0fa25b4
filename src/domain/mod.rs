// Domain layer: SDK-free models and the ports the AWS adapters implement.

pub mod model;
pub mod ports;
