use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

const SAVED_HEADER: &str = "# Snake simulator settings. Keys left out take their default values.\n";

/// YAML documents with a short header. A file holding only comments or
/// whitespace reads as an empty mapping, so every field takes its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }

    fn is_blank(content: &str) -> bool {
        content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        })
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        let body = serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
        Ok(format!("{}{}", SAVED_HEADER, body))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        let document = if Self::is_blank(content) { "{}" } else { content };
        serde_yaml_ng::from_str(document).map_err(|e| format!("Failed to parse config: {}", e))
    }
}
