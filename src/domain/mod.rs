// Domain layer: report models and ports to the external collaborators (git, task scheduler).

pub mod model;
pub mod ports;
