//! Commands module - service layer for the stability gate

mod evaluate;
pub(crate) mod service;
mod wait;

pub use evaluate::evaluate;
pub use service::StabilityGateService;

#[cfg(test)]
pub(crate) mod fakes;
