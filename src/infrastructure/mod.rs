//! Infrastructure layer - Assignment engine implementations

pub mod experiment;
pub mod logging;
pub mod services;
