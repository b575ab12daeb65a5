pub mod fake_api;
pub mod steps;
pub mod world;
