use thiserror::Error;

/// 应用程序错误类型
///
/// 出题、拼接、校验都没有错误路径，错误只出现在配置加载和会话宿主中
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置项取值不合法
    #[error("配置项 {field} 取值不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 会话错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 帧输入读取失败
    #[error("读取帧输入失败: {0}")]
    FeedReadFailed(#[source] std::io::Error),
    /// 会话任务异常退出
    #[error("会话任务异常退出: {0}")]
    TaskFailed(String),
}

// ========== 便捷构造函数 ==========

impl ConfigError {
    /// 创建配置项取值错误
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
