//! 提示自动消失

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::screens::{Dismissible, NOTICE_DISMISS_MS};

/// 监听状态中的成功提示，显示固定时间后清除
///
/// 到期时若显示的已经是另一条提示，则不动它。
pub fn auto_dismiss<T>(state: RwSignal<T>)
where
    T: Dismissible + Send + Sync + 'static,
{
    Effect::new(move |_| {
        if let Some(shown) = state.with(|s| s.dismissible()) {
            Timeout::new(NOTICE_DISMISS_MS, move || {
                state.try_update(|s| s.dismiss(&shown));
            })
            .forget();
        }
    });
}
