//! Milestone management across a fleet of repositories
//!
//! # Components
//!
//! - **targets**: expands configured repositories into (owner, name) pairs
//! - **gateway**: typed create/list/update calls for one repository
//! - **filter**: client-side overdue/closed filters
//! - **orchestrator**: runs one operation against every target and collects
//!   per-target outcomes without letting one failure abort the batch

pub mod filter;
pub mod gateway;
pub mod model;
pub mod orchestrator;
pub mod targets;

pub use filter::FilterCriteria;
pub use gateway::{MilestoneGateway, UpdateOutcome, LIST_PAGE_SIZE};
pub use model::{DueDate, Milestone, MilestonePatch, MilestoneSpec, MilestoneState, DATE_FORMAT};
pub use orchestrator::{BatchEntry, BatchOrchestrator, BatchResult, TargetOutcome};
pub use targets::{resolve, RepositoryTarget};
