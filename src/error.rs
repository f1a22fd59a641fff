//! 统一错误处理
//!
//! 错误分类刻意保持狭窄：未知语言代码和空的根节点不是错误，
//! 它们在各自的调用点静默降级为无操作。

use thiserror::Error;

/// 重翻译结果类型
pub type RetranslateResult<T> = Result<T, RetranslateError>;

/// 重翻译错误类型
#[derive(Error, Debug)]
pub enum RetranslateError {
    /// 规则中的匹配模式无法编译
    #[error("无效的匹配模式 '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// 规则表配置解析错误
    #[error("规则表配置解析失败: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 规则表配置文件读取错误
    #[error("规则表配置读取失败: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// 无法识别的语言代码字符串
    #[error("未知的语言代码: {0}")]
    UnknownLang(String),
}
