mod config_content_provider;
mod config_manager;
mod config_serializer;
mod simulation_config;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use simulation_config::SimulationConfig;
pub use validate::Validate;
