//! 遍历策略
//!
//! 决定哪些子树、文本节点和属性可以被翻译器改写。

use markup5ever_rcdom::{Handle, NodeData};

use crate::dom::get_node_attr;

/// 子树不可改写的元素
pub const SKIP_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "code", "pre", "textarea", "template",
];

/// 按固定顺序处理的可翻译属性
pub const TRANSLATABLE_ATTRS: &[&str] = &["placeholder", "title", "aria-label"];

/// 显式关闭翻译的专用标记属性
pub const NO_TRANSLATE_ATTR: &str = "data-live-translate";

/// 元素是否屏蔽其整棵子树的翻译
///
/// 命中跳过列表、携带 `data-live-translate="off"` 或标准
/// `translate="no"` 的元素及其后代永不被改写。
pub fn element_blocks_translation(node: &Handle) -> bool {
    let NodeData::Element { name, .. } = &node.data else {
        return false;
    };

    let tag = name.local.as_ref();
    if SKIP_ELEMENTS.iter().any(|skip| tag.eq_ignore_ascii_case(skip)) {
        return true;
    }

    if let Some(value) = get_node_attr(node, NO_TRANSLATE_ATTR) {
        if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("false") {
            return true;
        }
    }

    matches!(
        get_node_attr(node, "translate").as_deref(),
        Some("no") | Some("NO")
    )
}

/// 节点的任一祖先元素是否屏蔽翻译
///
/// 增量变更记录携带的是树深处的节点，必须沿父链回溯检查；
/// 否则落在被排除子树内部的变更会绕过遍历期的整树策略。
pub fn ancestor_blocks_translation(node: &Handle) -> bool {
    let mut current = node.clone();
    loop {
        // rcdom 的父指针存在 Cell 里，取出后原样放回
        let Some(weak) = current.parent.take() else {
            return false;
        };
        current.parent.set(Some(weak.clone()));

        let Some(parent) = weak.upgrade() else {
            return false;
        };
        if element_blocks_translation(&parent) {
            return true;
        }
        current = parent;
    }
}

/// 文本是否有资格进入翻译流程（至少包含一个非空白字符）
pub fn text_is_eligible(text: &str) -> bool {
    !text.trim().is_empty()
}
