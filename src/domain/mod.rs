// Domain layer: the listing record, run results and the ports the pipeline is built on.

pub mod model;
pub mod ports;
