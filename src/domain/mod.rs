//! Domain entities and value objects of the package wizard.

pub mod package;
pub mod types;
pub mod vip;
pub mod wizard;
