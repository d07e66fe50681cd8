// Domain layer: report/section models and ports (interfaces) to readers and storage.

pub mod model;
pub mod ports;
