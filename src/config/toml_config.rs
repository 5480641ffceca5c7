use crate::core::range::MAX_RANGE_BOARDS;
use crate::core::spec::{AllPorts, PortSpecParser};
use crate::domain::model::Notation;
use crate::utils::error::{PortSpecError, Result};
use crate::utils::validation::{
    validate_max_number, validate_positive_number, validate_slot_letters, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub all_ports: AllPorts,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Notation,
}

impl EngineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PortSpecError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortSpecError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOX_BOARDS})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 有指定路徑就載入，否則使用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parser(&self) -> PortSpecParser {
        PortSpecParser::new(self.all_ports.clone())
    }

    pub fn output_format(&self) -> Notation {
        self.output.format
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("all_ports.boards", self.all_ports.boards, 1)?;
        // 與單一範圍相同的板數上限
        validate_max_number("all_ports.boards", self.all_ports.boards, MAX_RANGE_BOARDS)?;
        validate_slot_letters("all_ports.slots", &self.all_ports.slots)?;
        Ok(())
    }
}
