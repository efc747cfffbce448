//! In-memory repository implementations.

mod action_item;
mod incident;
mod project;
mod rca_result;
mod user;

pub use action_item::MemActionItemRepository;
pub use incident::MemIncidentRepository;
pub use project::MemProjectRepository;
pub use rca_result::MemRcaResultRepository;
pub use user::MemUserRepository;
