pub mod flatness_demo;
pub mod unwrap_demo;
