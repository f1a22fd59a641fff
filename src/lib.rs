//! # Live Retranslate Library
//!
//! 一个用于已渲染页面的实时重翻译工具库：在不重新渲染的前提下，
//! 将 DOM 中所有可见文本和一组固定的可翻译属性原地改写为当前显示语言，
//! 并在后续内容变更时保持同步。
//!
//! ## 模块组织
//!
//! - `rules` - 规则表与翻译解析器（有序 模式→译文 数据表）
//! - `translator` - 实时翻译器会话（全量遍历 + 增量变更处理）
//! - `observer` - 同线程 DOM 变更通知通道
//! - `dom` - HTML 解析与节点操作辅助函数
//! - `error` - 统一错误类型

pub mod dom;
pub mod error;
pub mod observer;
pub mod rules;
pub mod translator;

// Re-export commonly used items for convenience
pub use error::{RetranslateError, RetranslateResult};
pub use observer::{MutationLog, MutationRecord};
pub use rules::{Lang, Pattern, RuleTable, TranslationRule};
pub use translator::{LiveTranslator, PassStats, SessionState};
