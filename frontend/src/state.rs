//! 页面状态的存放抽象
//!
//! 各页面的状态机是普通 Rust 结构体。浏览器里它们放在 `RwSignal` 中驱动界面，
//! 测试里放在 `RefCell` 中。异步流程只通过 [`StateCell`] 读写，
//! 且绝不跨 `.await` 持有借用。

use std::cell::RefCell;

use leptos::prelude::*;

pub trait StateCell<T> {
    /// 读取状态；信号已销毁时返回 `None`
    fn read_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
    /// 修改状态；信号已销毁时返回 `None`
    fn write_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for RefCell<T> {
    fn read_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn read_state<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

// =========================================================
// 请求代次
// =========================================================

/// 一次列表请求的代次票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// 单调递增的请求代次计数器
///
/// 每次发起列表请求领取一张新票据；响应回来时只有最新票据的结果会被采用，
/// 迟到的旧响应直接丢弃（后发先至也能保证"最后一次请求为准"）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    latest: u64,
}

impl Generation {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
