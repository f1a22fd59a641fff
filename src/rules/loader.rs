//! 规则表配置加载
//!
//! 规则表内容属于集成方配置数据：支持从 TOML 字符串或文件反序列化
//! 原始形式，再编译为 [`RuleTable`]。编译阶段校验每个正则模式，
//! 无效模式是结构化错误而不是 panic。
//!
//! 配置格式：
//!
//! ```toml
//! source = "fr"
//!
//! [[rule]]
//! patterns = ["Factures en attente de paiement", "Invoices Awaiting Payment"]
//! [rule.translations]
//! en = "Invoices awaiting payment"
//! nl = "Facturen in afwachting van betaling"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RetranslateResult;
use super::{builtin, Lang, Pattern, RuleTable, TranslationRule};

/// 规则表的原始（未编译）配置形式
#[derive(Debug, Clone, Deserialize)]
pub struct RuleTableSpec {
    /// 源语言，缺省为法语
    #[serde(default = "default_source_lang")]
    pub source: Lang,
    /// 有序规则列表
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleSpec>,
}

/// 单条规则的原始配置形式
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    /// 精确短语模式（正则转义后编译）
    #[serde(default)]
    pub patterns: Vec<String>,
    /// 原样正则模式（不转义，排在短语模式之后求值）
    #[serde(default)]
    pub regex_patterns: Vec<String>,
    /// 目标语言 → 替换文本
    #[serde(default)]
    pub translations: HashMap<Lang, String>,
}

fn default_source_lang() -> Lang {
    Lang::Fr
}

impl RuleTableSpec {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> RetranslateResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件解析
    pub fn from_toml_file(path: &Path) -> RetranslateResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 编译为规则表，保持声明顺序
    pub fn compile(self) -> RetranslateResult<RuleTable> {
        let mut rules = Vec::with_capacity(self.rules.len());

        for spec in self.rules {
            let mut patterns = Vec::with_capacity(spec.patterns.len() + spec.regex_patterns.len());
            for phrase in &spec.patterns {
                patterns.push(Pattern::phrase(phrase)?);
            }
            for expr in &spec.regex_patterns {
                patterns.push(Pattern::regex(expr)?);
            }

            rules.push(TranslationRule::new(patterns, spec.translations));
        }

        Ok(RuleTable::new(self.source, rules))
    }
}

/// 从 TOML 文件加载规则表；失败时回退到内置 CRM 规则表
pub fn load_rule_table_or_builtin(path: &Path) -> RuleTable {
    match RuleTableSpec::from_toml_file(path).and_then(RuleTableSpec::compile) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("规则表配置加载失败，使用内置规则表: {}", e);
            builtin::rule_table()
        }
    }
}
