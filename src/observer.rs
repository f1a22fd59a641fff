//! DOM 变更通知通道
//!
//! 对宿主环境原生变更观察机制的同线程建模：宿主在修改文档树时向
//! [`MutationLog`] 推入记录，已附加的翻译器会话按到达顺序批量消费。
//! 队列与 DOM 树共享同一逻辑线程，不涉及锁。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use markup5ever_rcdom::Handle;

/// 单条 DOM 变更记录
#[derive(Clone)]
pub enum MutationRecord {
    /// 新插入子树的根节点
    SubtreeAdded(Handle),
    /// 文本节点的字符数据发生变更
    CharacterData(Handle),
}

impl fmt::Debug for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationRecord::SubtreeAdded(node) => {
                write!(f, "SubtreeAdded({:p})", Rc::as_ptr(node))
            }
            MutationRecord::CharacterData(node) => {
                write!(f, "CharacterData({:p})", Rc::as_ptr(node))
            }
        }
    }
}

/// 同线程 FIFO 变更队列
///
/// 克隆句柄共享同一条底层队列。记录严格按推入顺序被取出，
/// 不做重排或合并。
#[derive(Clone, Default)]
pub struct MutationLog {
    records: Rc<RefCell<VecDeque<MutationRecord>>>,
}

impl MutationLog {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    /// 推入一条变更记录
    pub fn record(&self, record: MutationRecord) {
        self.records.borrow_mut().push_back(record);
    }

    /// 取出当前积压的全部记录（到达顺序）
    pub fn drain(&self) -> Vec<MutationRecord> {
        self.records.borrow_mut().drain(..).collect()
    }

    /// 当前积压的记录数
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl fmt::Debug for MutationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationLog")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::html_to_dom;

    #[test]
    fn test_log_preserves_arrival_order() {
        let dom = html_to_dom(b"<p>a</p>", "utf-8".to_string());
        let log = MutationLog::new();

        log.record(MutationRecord::SubtreeAdded(dom.document.clone()));
        log.record(MutationRecord::CharacterData(dom.document.clone()));
        assert_eq!(log.len(), 2, "Both records should be pending");

        let drained = log.drain();
        assert!(
            matches!(drained[0], MutationRecord::SubtreeAdded(_)),
            "First drained record should be the first pushed"
        );
        assert!(
            matches!(drained[1], MutationRecord::CharacterData(_)),
            "Second drained record should be the second pushed"
        );
        assert!(log.is_empty(), "Queue should be empty after drain");
    }

    #[test]
    fn test_cloned_log_shares_queue() {
        let dom = html_to_dom(b"<p>a</p>", "utf-8".to_string());
        let log = MutationLog::new();
        let clone = log.clone();

        clone.record(MutationRecord::SubtreeAdded(dom.document.clone()));
        assert_eq!(log.len(), 1, "Record pushed via clone should be visible");

        log.drain();
        assert!(clone.is_empty(), "Drain should empty the shared queue");
    }
}
