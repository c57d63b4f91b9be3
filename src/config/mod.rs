mod engine_config;
mod tuning;

pub use engine_config::EngineConfig;
pub use tuning::Tuning;
