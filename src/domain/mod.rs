// Domain layer: fixed labels, snapshot model and ports (interfaces).

pub mod model;
pub mod ports;
