// Domain layer: models and ports. No process or filesystem access here beyond report writing.

pub mod model;
pub mod ports;
