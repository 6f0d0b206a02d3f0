//! 非同期応答の取り違え防止
//!
//! トリガーごとに番号を発行し、最新の番号の応答だけを反映する。

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct RequestSeq {
    latest: Rc<Cell<u64>>,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいトリガーの番号を発行（以前の番号はすべて無効になる）
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Ticket(next)
    }

    /// 発行済みの番号をすべて無効化
    pub fn invalidate(&self) {
        self.issue();
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}
