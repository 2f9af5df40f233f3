//! Infrastructure services

mod exclusion_service;

pub use exclusion_service::ExclusionService;
