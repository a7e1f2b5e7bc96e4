//! Domain models for the chairside system.

mod appointment;
mod billing;
mod inventory;
mod patient;
mod staff;
mod treatment;

pub use appointment::*;
pub use billing::*;
pub use inventory::*;
pub use patient::*;
pub use staff::*;
pub use treatment::*;
