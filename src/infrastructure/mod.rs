//! Infrastructure layer - Collaborator implementations and services

pub mod audit;
pub mod exclusion;
pub mod experiment;
pub mod logging;
pub mod services;
pub mod snapshot;
