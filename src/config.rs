use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppResult, ConfigError};
use crate::workflow::VerifierDelays;

/// 程序配置
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 拼出正确答案后等待多久才发出答对信号（毫秒）
    pub debounce_ms: u64,
    /// 答对信号之后等待多久出下一题（毫秒）
    pub next_question_delay_ms: u64,
    /// 随机种子，设置后题目序列可复现
    pub rng_seed: Option<u64>,
    /// 帧通道容量
    pub frame_buffer: usize,
    /// 每帧追踪标记数上限，超过时该帧不参与比对，0 表示不限制
    pub max_tracked_markers: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            next_question_delay_ms: 1000,
            rng_seed: None,
            frame_buffer: 64,
            max_tracked_markers: 0,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            debounce_ms: env_or("QUIZ_DEBOUNCE_MS", default.debounce_ms),
            next_question_delay_ms: env_or(
                "QUIZ_NEXT_QUESTION_DELAY_MS",
                default.next_question_delay_ms,
            ),
            rng_seed: std::env::var("QUIZ_RNG_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(default.rng_seed),
            frame_buffer: env_or("QUIZ_FRAME_BUFFER", default.frame_buffer),
            max_tracked_markers: env_or("QUIZ_MAX_TRACKED_MARKERS", default.max_tracked_markers),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载，缺省项使用默认值
    pub async fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        let config =
            Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 校验配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_buffer == 0 {
            return Err(ConfigError::invalid("frame_buffer", "帧通道容量必须大于 0"));
        }
        Ok(())
    }

    /// 校验器使用的两段延迟
    pub fn delays(&self) -> VerifierDelays {
        VerifierDelays {
            debounce: Duration::from_millis(self.debounce_ms),
            next_question: Duration::from_millis(self.next_question_delay_ms),
        }
    }
}

/// 读取环境变量，不存在或无法解析时使用默认值
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
