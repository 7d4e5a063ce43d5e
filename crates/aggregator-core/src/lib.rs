pub mod config;
pub mod logging;

pub mod driver;
pub mod fetch;
pub mod matcher;
pub mod report;
