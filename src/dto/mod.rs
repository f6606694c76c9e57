//! DTOs handed from the services to whatever renders them.

pub mod packages;
pub mod wizard;
