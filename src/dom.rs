//! HTML 解析与节点操作辅助函数
//!
//! 基于 `markup5ever_rcdom` 的轻量 DOM 层：解析、属性读写、文本读写，
//! 以及宿主在翻译会话存续期间使用的可记录变更的修改入口
//! （[`append_fragment`]、[`set_text`]）。

use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::format_tendril;
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, parse_document, parse_fragment, LocalName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::observer::{MutationLog, MutationRecord};

/// 将 HTML 字节解析为 DOM，可选指定字符集标签
pub fn html_to_dom(data: &[u8], document_encoding: String) -> RcDom {
    let s: String;

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        s = string.to_string();
    } else {
        s = String::from_utf8_lossy(data).to_string();
    }

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .unwrap()
}

/// 将 HTML 片段解析为游离的节点列表（不属于任何文档）
pub fn html_to_fragment(html: &str) -> Vec<Handle> {
    let dom = parse_fragment(
        RcDom::default(),
        Default::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        vec![],
    )
    .from_utf8()
    .read_from(&mut html.as_bytes())
    .unwrap();

    // parse_fragment 将片段内容挂在 document 下的合成 <html> 元素里
    let context = dom.document.children.borrow().first().cloned();
    let Some(context) = context else {
        return Vec::new();
    };
    let nodes: Vec<Handle> = context.children.borrow_mut().drain(..).collect();
    nodes
}

/// 节点身份键：对存活的 `Handle` 稳定
pub fn node_id(node: &Handle) -> usize {
    Rc::as_ptr(node) as usize
}

/// 获取元素节点的标签名
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 设置节点属性；`None` 表示移除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();

        if let Some(existing) = attrs_mut
            .iter_mut()
            .find(|attr| &*attr.name.local == attr_name)
        {
            match attr_value {
                Some(value) => {
                    existing.value.clear();
                    existing.value.push_slice(value.as_str());
                }
                None => {
                    attrs_mut.retain(|attr| &*attr.name.local != attr_name);
                }
            }
        } else if let Some(value) = attr_value {
            attrs_mut.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: format_tendril!("{}", value),
            });
        }
    }
}

/// 读取文本节点内容；非文本节点返回 `None`
pub fn text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 改写文本节点内容并向变更队列记录一条字符数据变更
///
/// 非文本节点时什么也不做。
pub fn set_text(node: &Handle, value: &str, log: &MutationLog) {
    if let NodeData::Text { contents } = &node.data {
        {
            let mut contents_mut = contents.borrow_mut();
            contents_mut.clear();
            contents_mut.push_slice(value);
        }
        log.record(MutationRecord::CharacterData(node.clone()));
    }
}

/// 将 HTML 片段追加为指定节点的子节点，并为每个插入的顶层节点
/// 向变更队列记录一条子树插入
///
/// 返回插入的顶层节点列表。
pub fn append_fragment(parent: &Handle, html: &str, log: &MutationLog) -> Vec<Handle> {
    let added = html_to_fragment(html);

    for node in &added {
        node.parent.set(Some(Rc::downgrade(parent)));
        parent.children.borrow_mut().push(node.clone());
        log.record(MutationRecord::SubtreeAdded(node.clone()));
    }

    added
}

/// 深度优先查找第一个匹配标签名的元素
pub fn find_first_element(node: &Handle, tag_name: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if &*name.local == tag_name {
            return Some(node.clone());
        }
    }

    for child in node.children.borrow().iter() {
        if let Some(found) = find_first_element(child, tag_name) {
            return Some(found);
        }
    }

    None
}

/// 深度优先查找第一个带有指定属性值的元素
pub fn find_element_by_attr(node: &Handle, attr_name: &str, attr_value: &str) -> Option<Handle> {
    if get_node_attr(node, attr_name).as_deref() == Some(attr_value) {
        return Some(node.clone());
    }

    for child in node.children.borrow().iter() {
        if let Some(found) = find_element_by_attr(child, attr_name, attr_value) {
            return Some(found);
        }
    }

    None
}
