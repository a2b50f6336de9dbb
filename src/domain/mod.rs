// Domain layer: the stock record model and the ports the store and config plug into.

pub mod model;
pub mod ports;
