pub mod assistant;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod storage;
pub mod store;
pub mod workflow;
