//! 页面间共用的小组件

use leptos::prelude::*;
use mentorlink_shared::{RequestStatus, Role};

use crate::auth::use_auth;
use crate::screens::Notice;

/// 头像；加载失败时换成按角色区分的占位图
#[component]
pub fn ProfileImage(
    #[prop(into)] image_url: Signal<String>,
    role: Role,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let config = use_auth().config().clone();
    let placeholder = config.placeholder_image(role);
    let failed = RwSignal::new(false);

    // 地址变化后重新尝试加载
    Effect::new(move |_| {
        image_url.track();
        failed.set(false);
    });

    let src = move || {
        if failed.get() {
            placeholder.clone()
        } else {
            config.image_url(&image_url.get())
        }
    };

    view! {
        <img src=src class=class alt="profile" on:error=move |_| failed.set(true) />
    }
}

/// 请求状态徽章
#[component]
pub fn StatusBadge(status: RequestStatus) -> impl IntoView {
    view! {
        <span class=format!("badge {}", status.css_class())>{status.label()}</span>
    }
}

/// 右上角的操作结果提示
#[component]
pub fn NoticeToast(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = if n.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{n.text}</span>
                    </div>
                </div>
            }
        })
    }
}

/// 行内错误提示
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{msg}</span>
                </div>
            }
        })
    }
}

/// 当前角色无权访问本页时的提示
#[component]
pub fn AccessDenied(message: &'static str) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center text-center">
                <h2 class="card-title text-error">"Access denied"</h2>
                <p class="text-base-content/70">{message}</p>
            </div>
        </div>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
