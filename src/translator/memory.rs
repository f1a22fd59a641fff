//! 会话级原值记录存储
//!
//! 以节点身份为键、按"首次观察即记录、此后永不覆盖"的策略保存
//! 文本节点和属性的原始内容。记录归属单个翻译会话；会话解除附加时
//! 整体清空。记录内保留一个 `Handle` 克隆，保证指针键在会话期间稳定
//! （已从文档移除的节点在会话解除时一并回收）。

use std::collections::HashMap;

use markup5ever_rcdom::Handle;

use crate::dom::node_id;

/// 单个节点的原值记录
#[derive(Debug)]
struct OriginalRecord {
    /// 保持节点存活，确保指针身份键不被复用
    _node: Handle,
    /// 文本节点的首次观察内容
    text: Option<String>,
    /// 属性名 → 首次观察值
    attrs: HashMap<String, String>,
}

impl OriginalRecord {
    fn new(node: Handle) -> Self {
        Self {
            _node: node,
            text: None,
            attrs: HashMap::new(),
        }
    }
}

/// 原值存储
#[derive(Debug, Default)]
pub struct OriginalValueStore {
    records: HashMap<usize, OriginalRecord>,
}

impl OriginalValueStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回文本节点的原始内容；节点首次出现时以 `current` 记录
    pub fn text_original(&mut self, node: &Handle, current: &str) -> String {
        let record = self
            .records
            .entry(node_id(node))
            .or_insert_with(|| OriginalRecord::new(node.clone()));

        record
            .text
            .get_or_insert_with(|| current.to_string())
            .clone()
    }

    /// 返回元素属性的原始值；该属性首次出现时以 `current` 记录
    ///
    /// 同一元素的不同属性独立记录。
    pub fn attr_original(&mut self, node: &Handle, attr_name: &str, current: &str) -> String {
        let record = self
            .records
            .entry(node_id(node))
            .or_insert_with(|| OriginalRecord::new(node.clone()));

        record
            .attrs
            .entry(attr_name.to_string())
            .or_insert_with(|| current.to_string())
            .clone()
    }

    /// 已记录的节点数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 存储是否为空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 丢弃全部记录（会话解除附加时调用）
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{find_first_element, html_to_dom};

    #[test]
    fn test_text_original_captured_once() {
        let dom = html_to_dom(b"<p>Leads</p>", "utf-8".to_string());
        let p = find_first_element(&dom.document, "p").expect("Should find <p>");
        let mut store = OriginalValueStore::new();

        assert_eq!(store.text_original(&p, "Leads"), "Leads");
        assert_eq!(
            store.text_original(&p, "Prospects"),
            "Leads",
            "Later visits must return the first-observed value"
        );
        assert_eq!(store.len(), 1, "One node should be recorded");
    }

    #[test]
    fn test_attr_originals_are_independent() {
        let dom = html_to_dom(b"<input title=\"a\" placeholder=\"b\">", "utf-8".to_string());
        let input = find_first_element(&dom.document, "input").expect("Should find <input>");
        let mut store = OriginalValueStore::new();

        assert_eq!(store.attr_original(&input, "title", "a"), "a");
        assert_eq!(store.attr_original(&input, "placeholder", "b"), "b");
        assert_eq!(
            store.attr_original(&input, "title", "changed"),
            "a",
            "Each attribute keeps its own first-observed value"
        );
        assert_eq!(store.len(), 1, "Both attributes live on one node record");
    }

    #[test]
    fn test_clear_discards_everything() {
        let dom = html_to_dom(b"<p>Leads</p>", "utf-8".to_string());
        let p = find_first_element(&dom.document, "p").expect("Should find <p>");
        let mut store = OriginalValueStore::new();

        store.text_original(&p, "Leads");
        store.clear();
        assert!(store.is_empty(), "Clear must drop all records");
        assert_eq!(
            store.text_original(&p, "Prospects"),
            "Prospects",
            "A fresh capture starts from the current value"
        );
    }
}
