//! 规则表与翻译解析器
//!
//! 有序的 模式→译文 规则表。表是纯数据结构，解析器是
//! `(表, 文本, 语言)` 的纯函数，可完全脱离 DOM 单独测试。
//!
//! 声明顺序具有语义：规则按表序求值，靠后的规则可以继续改写
//! 靠前规则的输出（复合短语必须排在其包含的较窄短语之前）。

pub mod builtin;
pub mod loader;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{RetranslateError, RetranslateResult};

/// 支持的语言代码（固定可枚举集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// 法语 - 源应用默认渲染语言
    Fr,
    /// 英语
    En,
    /// 荷兰语
    Nl,
}

impl Lang {
    /// 全部支持的语言
    pub const ALL: &'static [Lang] = &[Lang::Fr, Lang::En, Lang::Nl];

    /// 语言代码字符串
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
            Lang::Nl => "nl",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = RetranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" => Ok(Lang::Fr),
            "en" => Ok(Lang::En),
            "nl" => Ok(Lang::Nl),
            other => Err(RetranslateError::UnknownLang(other.to_string())),
        }
    }
}

/// 模式种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// 精确短语（正则转义后编译）
    Phrase,
    /// 原样正则表达式
    Regex,
}

/// 单个源语言匹配模式
///
/// 所有模式都以大小写不敏感方式编译，替换为全局、字面替换
/// （替换文本中的 `$` 不展开捕获组）。
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    text: String,
    kind: PatternKind,
}

impl Pattern {
    /// 由精确短语构建模式
    pub fn phrase(text: &str) -> RetranslateResult<Self> {
        Self::compile(&regex::escape(text), text, PatternKind::Phrase)
    }

    /// 由原样正则表达式构建模式
    pub fn regex(expr: &str) -> RetranslateResult<Self> {
        Self::compile(expr, expr, PatternKind::Regex)
    }

    fn compile(expr: &str, text: &str, kind: PatternKind) -> RetranslateResult<Self> {
        let regex = RegexBuilder::new(expr)
            .case_insensitive(true)
            .build()
            .map_err(|source| RetranslateError::InvalidPattern {
                pattern: text.to_string(),
                source: Box::new(source),
            })?;

        Ok(Self {
            regex,
            text: text.to_string(),
            kind,
        })
    }

    /// 模式的原始书写形式
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 模式种类
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// 文本中是否出现该模式
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// 对全部出现处做字面替换，无匹配时原样返回
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        self.regex
            .replace_all(text, NoExpand(replacement))
            .into_owned()
    }
}

/// 翻译规则：一组等价的源语言表述 → 各目标语言的替换文本
#[derive(Debug, Clone)]
pub struct TranslationRule {
    patterns: Vec<Pattern>,
    translations: HashMap<Lang, String>,
}

impl TranslationRule {
    /// 由已编译的模式构建规则
    pub fn new(patterns: Vec<Pattern>, translations: HashMap<Lang, String>) -> Self {
        Self {
            patterns,
            translations,
        }
    }

    /// 便利构造：全部为精确短语模式
    pub fn phrases(
        phrases: &[&str],
        translations: &[(Lang, &str)],
    ) -> RetranslateResult<Self> {
        let mut patterns = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            patterns.push(Pattern::phrase(phrase)?);
        }

        Ok(Self {
            patterns,
            translations: translations
                .iter()
                .map(|(lang, text)| (*lang, (*text).to_string()))
                .collect(),
        })
    }

    /// 规则的模式集合（声明顺序）
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// 指定目标语言的替换文本；缺失表示该语言无译文
    pub fn replacement_for(&self, lang: Lang) -> Option<&str> {
        self.translations.get(&lang).map(String::as_str)
    }

    /// 将规则应用到运行中的文本上
    ///
    /// 短语模式与替换文本逐字节相同（恒等替换）时跳过：
    /// 此类替换唯一可能的效果是改写其它大小写形式的匹配，
    /// 会破坏排在前面的复合规则已经产出的短语。
    fn apply(&self, text: String, lang: Lang) -> String {
        let Some(replacement) = self.replacement_for(lang) else {
            return text;
        };

        let mut result = text;
        for pattern in &self.patterns {
            if pattern.kind == PatternKind::Phrase && pattern.text() == replacement {
                continue;
            }
            if pattern.is_match(&result) {
                result = pattern.replace_all(&result, replacement);
            }
        }
        result
    }
}

/// 有序规则表
///
/// 规则求值严格按声明顺序进行；同一遍内靠后的规则可以继续改写
/// 靠前规则产生的文本，这是刻意的组合式设计。
#[derive(Debug, Clone)]
pub struct RuleTable {
    source: Lang,
    rules: Vec<TranslationRule>,
}

impl RuleTable {
    /// 由源语言和有序规则列表构建规则表
    pub fn new(source: Lang, rules: Vec<TranslationRule>) -> Self {
        Self { source, rules }
    }

    /// 源语言（UI 默认渲染语言，永不被改写）
    pub fn source(&self) -> Lang {
        self.source
    }

    /// 规则数量
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 规则表是否为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 规则列表（声明顺序）
    pub fn rules(&self) -> &[TranslationRule] {
        &self.rules
    }

    /// 将文本解析为目标语言
    ///
    /// 空文本或目标语言等于源语言时原样返回（快速路径）。
    /// 无任何规则命中的片段原样保留，未知片段不构成错误。
    pub fn resolve(&self, text: &str, lang: Lang) -> String {
        if text.is_empty() || lang == self.source {
            return text.to_string();
        }

        let mut result = text.to_string();
        for rule in &self.rules {
            result = rule.apply(result, lang);
        }
        result
    }
}
