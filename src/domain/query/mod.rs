pub mod params;
pub mod service;
