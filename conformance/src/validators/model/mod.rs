//! Definition-set validators (references, inheritance, properties).

pub mod inheritance;
pub mod properties;
pub mod references;
