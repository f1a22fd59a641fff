//! 实时翻译器会话
//!
//! 附加到一个根节点与目标语言上的进程级观察者：附加时同步完成一次
//! 全量子树遍历，之后按到达顺序消费变更队列中的增量批次，把所有
//! 可见文本与可翻译属性保持在当前显示语言。
//!
//! 会话状态机：**Inactive** → `attach` → **Attached** → `detach` →
//! **Inactive**。显示语言变化时应当解除附加并重新附加；调用方必须
//! 保证重新附加前 DOM 已恢复为源语言内容（或已重新渲染），否则原值
//! 捕获会在已翻译文本上失真——这是文档化的调用方义务，翻译器自身
//! 无法检测。
//!
//! 全部遍历同步、有界、单线程；写回只在计算值与当前值不同时发生，
//! 这一不变量从结构上切断了变更反馈循环。

pub mod memory;
pub mod policy;

use std::cell::Cell;

use markup5ever_rcdom::{Handle, NodeData};
use tracing::{debug, trace, warn};

use crate::dom::{get_node_attr, set_node_attr};
use crate::observer::{MutationLog, MutationRecord};
use crate::rules::{Lang, RuleTable};

use memory::OriginalValueStore;
use policy::{
    ancestor_blocks_translation, element_blocks_translation, text_is_eligible, TRANSLATABLE_ATTRS,
};

/// 一次 flush 内排空队列的最大轮数；收敛性保证通常一轮即静止，
/// 上限仅防御性地约束异常规则表
const MAX_FLUSH_ROUNDS: usize = 8;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 未附加，不观察任何内容
    Inactive,
    /// 已附加到根节点，正在消费变更批次
    Attached,
}

/// 单次遍历统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// 访问过的节点数
    pub nodes_visited: usize,
    /// 改写的文本节点数
    pub texts_translated: usize,
    /// 改写的属性数
    pub attributes_translated: usize,
    /// 因计算值等于当前值而省略的写回数
    pub writes_elided: usize,
    /// 因策略被整体跳过的子树数
    pub subtrees_skipped: usize,
}

impl PassStats {
    /// 累加另一份统计
    pub fn merge(&mut self, other: &PassStats) {
        self.nodes_visited += other.nodes_visited;
        self.texts_translated += other.texts_translated;
        self.attributes_translated += other.attributes_translated;
        self.writes_elided += other.writes_elided;
        self.subtrees_skipped += other.subtrees_skipped;
    }

    /// 本次遍历实际发生的改写总数
    pub fn total_translated(&self) -> usize {
        self.texts_translated + self.attributes_translated
    }
}

/// 实时翻译器
///
/// 一个实例对应一次"附加"会话；原值记录归属该会话，解除附加即整体
/// 丢弃。同一文档根同一时刻只允许一个活动会话，由宿主保证。
pub struct LiveTranslator {
    table: RuleTable,
    lang: Lang,
    state: SessionState,
    log: Option<MutationLog>,
    memory: OriginalValueStore,
    in_pass: Cell<bool>,
    stats: PassStats,
}

impl LiveTranslator {
    /// 以规则表和目标语言创建未附加的翻译器
    pub fn new(table: RuleTable, lang: Lang) -> Self {
        Self {
            table,
            lang,
            state: SessionState::Inactive,
            log: None,
            memory: OriginalValueStore::new(),
            in_pass: Cell::new(false),
            stats: PassStats::default(),
        }
    }

    /// 当前会话状态
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 会话的目标语言
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// 会话累计统计
    pub fn stats(&self) -> PassStats {
        self.stats
    }

    /// 附加到根节点：先同步完成全量遍历，再开始消费 `log` 中的
    /// 变更批次
    ///
    /// 空的或没有子节点的根降级为无操作附加。若会话已处于附加状态，
    /// 先解除旧附加（丢弃旧记录）再建立新附加。
    ///
    /// 返回全量遍历的统计。
    pub fn attach(&mut self, root: &Handle, log: &MutationLog) -> PassStats {
        if self.state == SessionState::Attached {
            warn!("翻译器已处于附加状态，先解除旧会话");
            self.detach();
        }

        self.log = Some(log.clone());
        self.state = SessionState::Attached;

        // 全量遍历严格先于任何增量处理
        let mut pass = PassStats::default();
        self.translate_subtree(root, &mut pass);
        self.stats.merge(&pass);
        debug!(
            lang = %self.lang,
            nodes = pass.nodes_visited,
            translated = pass.total_translated(),
            "initial full pass complete"
        );

        // 排空本次遍历自身写回产生的记录；收敛性保证它们都是无操作
        self.flush();

        pass
    }

    /// 按到达顺序处理积压的变更批次
    ///
    /// 新插入的子树做受限全量遍历，字符数据变更只重译单个节点；
    /// 两类记录都先沿父链检查，落在被排除子树内部的变更不被处理。
    /// 翻译器自身的写回同样进入队列，本方法循环排空直到静止。
    /// 未附加时为无操作。
    pub fn flush(&mut self) -> PassStats {
        let mut pass = PassStats::default();

        if self.state != SessionState::Attached {
            return pass;
        }
        if self.in_pass.get() {
            trace!("nested flush ignored");
            return pass;
        }
        let Some(log) = self.log.clone() else {
            return pass;
        };

        self.in_pass.set(true);

        let mut rounds = 0;
        while !log.is_empty() {
            rounds += 1;
            if rounds > MAX_FLUSH_ROUNDS {
                warn!(rounds, "变更队列未收敛，中止本次 flush");
                break;
            }

            for record in log.drain() {
                match record {
                    MutationRecord::SubtreeAdded(node) => {
                        // 落在被排除子树内部的插入与整树遍历同样跳过
                        if ancestor_blocks_translation(&node) {
                            pass.subtrees_skipped += 1;
                            continue;
                        }
                        self.translate_subtree(&node, &mut pass);
                    }
                    MutationRecord::CharacterData(node) => {
                        if ancestor_blocks_translation(&node) {
                            pass.subtrees_skipped += 1;
                            continue;
                        }
                        pass.nodes_visited += 1;
                        self.translate_text_node(&node, &mut pass);
                    }
                }
            }
        }

        self.in_pass.set(false);
        self.stats.merge(&pass);
        pass
    }

    /// 解除附加：停止消费变更并丢弃全部原值记录
    ///
    /// 之后的重新附加从空记录开始，以 DOM 当时显示的文本重新捕获
    /// 原值。
    pub fn detach(&mut self) {
        self.state = SessionState::Inactive;
        self.log = None;
        self.memory.clear();
        debug!(lang = %self.lang, "session detached, original-value records discarded");
    }

    /// 受限于单棵子树的同步遍历
    fn translate_subtree(&mut self, node: &Handle, pass: &mut PassStats) {
        pass.nodes_visited += 1;

        match node.data {
            NodeData::Document => {
                for child in node.children.borrow().iter() {
                    self.translate_subtree(child, pass);
                }
            }
            NodeData::Text { .. } => {
                self.translate_text_node(node, pass);
            }
            NodeData::Element { .. } => {
                if element_blocks_translation(node) {
                    pass.subtrees_skipped += 1;
                    return;
                }

                self.translate_attributes(node, pass);

                for child in node.children.borrow().iter() {
                    self.translate_subtree(child, pass);
                }
            }
            // 注释、doctype 等无需处理
            _ => {}
        }
    }

    /// 重译单个文本节点
    ///
    /// 原值按"首次观察"捕获；翻译始终从存储的原值出发，不从节点
    /// 当前（可能已被翻译过的）内容出发。只有计算值与当前值不同
    /// 时才写回。
    fn translate_text_node(&mut self, node: &Handle, pass: &mut PassStats) {
        let NodeData::Text { ref contents } = node.data else {
            return;
        };

        let current = contents.borrow().to_string();
        if !text_is_eligible(&current) {
            return;
        }

        let original = self.memory.text_original(node, &current);
        let translated = self.table.resolve(&original, self.lang);

        if translated == current {
            pass.writes_elided += 1;
            return;
        }

        {
            let mut contents_mut = contents.borrow_mut();
            contents_mut.clear();
            contents_mut.push_slice(&translated);
        }
        // 写回本身是一次可观察的变更
        if let Some(log) = &self.log {
            log.record(MutationRecord::CharacterData(node.clone()));
        }
        pass.texts_translated += 1;
        trace!(from = %original, to = %translated, "text node rewritten");
    }

    /// 对固定属性集合逐个应用"捕获原值/从原值翻译/变更才写回"策略
    fn translate_attributes(&mut self, node: &Handle, pass: &mut PassStats) {
        for attr_name in TRANSLATABLE_ATTRS {
            let Some(current) = get_node_attr(node, attr_name) else {
                continue;
            };
            if !text_is_eligible(&current) {
                continue;
            }

            let original = self.memory.attr_original(node, attr_name, &current);
            let translated = self.table.resolve(&original, self.lang);

            if translated == current {
                pass.writes_elided += 1;
                continue;
            }

            set_node_attr(node, attr_name, Some(translated.clone()));
            pass.attributes_translated += 1;
            trace!(attr = attr_name, to = %translated, "attribute rewritten");
        }
    }
}

impl std::fmt::Debug for LiveTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveTranslator")
            .field("lang", &self.lang)
            .field("state", &self.state)
            .field("recorded_nodes", &self.memory.len())
            .finish()
    }
}
