// Library root: configuration, the league data model, and dataset loading.

pub mod config;
pub mod data;
pub mod model;
