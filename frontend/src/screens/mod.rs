//! 各页面的状态机与异步流程
//!
//! 这里不依赖 DOM：状态是普通结构体，流程函数通过 [`crate::state::StateCell`]
//! 读写状态，通过 [`crate::api::ApiClient`] 访问后端。
//! `components` 中的视图只负责把信号绑定到这些状态上。

pub mod auth_forms;
pub mod mentors;
pub mod profile;
pub mod requests;

/// 成功提示的自动消失时间
pub const NOTICE_DISMISS_MS: u32 = 3_000;

/// 操作结果提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// 只有成功提示会自动消失，错误提示保留到下一次操作
    pub fn auto_dismiss(&self) -> bool {
        !self.is_error
    }
}

/// 带有可自动消失提示的页面状态
pub trait Dismissible {
    /// 当前应自动消失的提示文本
    fn dismissible(&self) -> Option<String>;
    /// 仍在显示 `shown` 时清除它
    fn dismiss(&mut self, shown: &str);
}

fn dismissible_notice(slot: &Option<Notice>) -> Option<String> {
    slot.as_ref()
        .filter(|n| n.auto_dismiss())
        .map(|n| n.text.clone())
}

fn dismiss_notice(slot: &mut Option<Notice>, shown: &str) {
    if slot.as_ref().is_some_and(|n| n.auto_dismiss() && n.text == shown) {
        *slot = None;
    }
}

impl Dismissible for mentors::MentorBrowser {
    fn dismissible(&self) -> Option<String> {
        dismissible_notice(&self.notice)
    }

    fn dismiss(&mut self, shown: &str) {
        dismiss_notice(&mut self.notice, shown);
    }
}

impl Dismissible for requests::RequestBoard {
    fn dismissible(&self) -> Option<String> {
        dismissible_notice(&self.notice)
    }

    fn dismiss(&mut self, shown: &str) {
        dismiss_notice(&mut self.notice, shown);
    }
}

impl Dismissible for profile::ProfileForm {
    fn dismissible(&self) -> Option<String> {
        self.success.clone()
    }

    fn dismiss(&mut self, shown: &str) {
        if self.success.as_deref() == Some(shown) {
            self.success = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_not_dismissed() {
        let mut slot = Some(Notice::error("boom"));
        assert_eq!(dismissible_notice(&slot), None);
        dismiss_notice(&mut slot, "boom");
        assert!(slot.is_some());
    }

    #[test]
    fn newer_notice_survives_old_timer() {
        let mut slot = Some(Notice::success("Request accepted."));
        let shown = dismissible_notice(&slot).unwrap();
        slot = Some(Notice::success("Request rejected."));
        dismiss_notice(&mut slot, &shown);
        assert_eq!(slot, Some(Notice::success("Request rejected.")));
        dismiss_notice(&mut slot, "Request rejected.");
        assert_eq!(slot, None);
    }
}
