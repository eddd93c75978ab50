//! 命令行配置
//!
//! 默认路径为 `<config_dir>/janggi/cli.json`，文件不存在时使用默认值。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 命令行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 每步走完后打印棋盘
    pub show_board: bool,
    /// 日志过滤指令
    pub log_directive: String,
    /// 起始局面布局字符串，为空时使用标准开局
    pub start_position: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            show_board: true,
            log_directive: "janggi=info".to_string(),
            start_position: None,
        }
    }
}

impl CliConfig {
    /// 默认配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("janggi");
            path.push("cli.json");
            path
        })
    }

    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认路径不存在或无法确定时返回默认配置。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// 从指定文件加载配置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// 保存配置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }
}
