pub mod policy;
pub mod report;

pub use policy::{accept, evaluate_gates, GateDecision, GateRejection};
pub use report::{inspect, GateReport};
