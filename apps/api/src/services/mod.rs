//! Per-collection CRUD services. No business rules beyond field shape;
//! anything clever lives in the flows.

pub mod faqs;
pub mod handlers;
pub mod progress;
pub mod tasks;
pub mod users;
