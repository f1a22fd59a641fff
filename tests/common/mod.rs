// 集成测试公共模块
//
// 提供测试页面构建与 DOM 查询辅助工具

#![allow(dead_code)]

use live_retranslate::dom::{find_first_element, html_to_dom, text_content};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 初始化测试日志输出（RUST_LOG 控制级别，重复调用安全）
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// HTML 测试辅助工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 从 HTML 字符串创建测试 DOM
    pub fn create_test_dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8".to_string())
    }

    /// 法语源语言渲染的 CRM 仪表盘页面
    pub fn create_crm_dashboard_page() -> String {
        r#"<!DOCTYPE html>
<html>
<head><title>Tableau de bord</title></head>
<body>
    <h1>Tableau de bord</h1>
    <nav>
        <a href="/leads" title="Prospects">Prospects</a>
        <a href="/invoices">Factures en attente de paiement</a>
        <a href="/orders">Commandes</a>
    </nav>
    <input type="search" placeholder="Rechercher" aria-label="Rechercher">
    <section>
        <h2>Clients</h2>
        <p>En attente</p>
    </section>
</body>
</html>"#
            .to_string()
    }

    /// 带"禁止翻译"标记子树的页面
    pub fn create_marked_page() -> String {
        r#"<!DOCTYPE html>
<html>
<body>
    <div id="translated">Leads</div>
    <div id="frozen" data-live-translate="off"><span>Leads</span></div>
    <pre>Leads</pre>
</body>
</html>"#
            .to_string()
    }
}

/// DOM 查询辅助工具
pub struct DomQuery;

impl DomQuery {
    /// 按标签名查找第一个元素
    pub fn element(dom: &RcDom, tag: &str) -> Handle {
        find_first_element(&dom.document, tag)
            .unwrap_or_else(|| panic!("element <{}> should exist in the test page", tag))
    }

    /// 按 id 属性查找元素
    pub fn element_by_id(dom: &RcDom, id: &str) -> Handle {
        live_retranslate::dom::find_element_by_attr(&dom.document, "id", id)
            .unwrap_or_else(|| panic!("element #{} should exist in the test page", id))
    }

    /// 元素的第一个文本子节点内容（去除首尾空白）
    pub fn text_of(node: &Handle) -> String {
        node.children
            .borrow()
            .iter()
            .find_map(text_content)
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    /// 元素的第一个文本子节点句柄
    pub fn text_node_of(node: &Handle) -> Handle {
        node.children
            .borrow()
            .iter()
            .find(|child| matches!(child.data, NodeData::Text { .. }))
            .cloned()
            .expect("element should have a text child")
    }

    /// 收集整棵子树的可见文本（跳过 script/style），用于整页断言
    pub fn collect_text(node: &Handle) -> String {
        let mut out = String::new();
        Self::collect_text_into(node, &mut out);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text_into(node: &Handle, out: &mut String) {
        match &node.data {
            NodeData::Text { contents } => {
                out.push_str(&contents.borrow());
                out.push(' ');
            }
            NodeData::Element { name, .. } => {
                if matches!(name.local.as_ref(), "script" | "style") {
                    return;
                }
                for child in node.children.borrow().iter() {
                    Self::collect_text_into(child, out);
                }
            }
            _ => {
                for child in node.children.borrow().iter() {
                    Self::collect_text_into(child, out);
                }
            }
        }
    }
}
