//! 路由服务模块 - 核心引擎
//!
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程："请求 -> 守卫 -> 重定向或渲染"。
//! 守卫决定本身在 [`super::route::guard`] 中，这里只负责把它接到信号和 History 上。

use leptos::ev;
use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

use super::route::{AppRoute, GuardDecision, guard};
use crate::session::SessionState;

/// 获取当前浏览器路径
fn current_path() -> String {
    window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

/// 推送 History 状态（用户主动导航）
fn push_history_state(path: &str) {
    if let Ok(history) = window().history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 替换 History 状态（守卫重定向）
fn replace_history_state(path: &str) {
    if let Ok(history) = window().history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 路由器服务
///
/// 通过注入的会话信号与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 用户请求的路由（来自 URL、链接或前进/后退）
    requested: RwSignal<AppRoute>,
    /// 守卫判定；只在结果变化时通知，资料更新等不会让页面重新挂载
    decision: Memo<GuardDecision>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let requested = RwSignal::new(AppRoute::from_path(&current_path()));
        let decision = Memo::new(move |_| {
            let route = requested.get();
            session.with(|s| guard(route, s))
        });
        Self {
            requested,
            decision,
        }
    }

    pub fn decision(&self) -> Memo<GuardDecision> {
        self.decision
    }

    /// 用户主动导航：推入历史记录，守卫随后生效
    pub fn navigate(&self, route: AppRoute) {
        push_history_state(route.to_path());
        self.requested.set(route);
    }

    /// 浏览器后退/前进时重新走一遍守卫
    fn init_popstate_listener(&self) {
        let requested = self.requested;
        let handle = window_event_listener(ev::popstate, move |_| {
            requested.set(AppRoute::from_path(&current_path()));
        });
        // 监听器与应用同生命周期
        std::mem::forget(handle);
    }

    /// 守卫判定为重定向时替换当前历史记录
    fn setup_guard_redirect(&self) {
        let requested = self.requested;
        let decision = self.decision;

        Effect::new(move |_| {
            if let GuardDecision::Redirect(target) = decision.get() {
                log!(
                    "[Router] {} -> {}",
                    requested.get_untracked(),
                    target
                );
                replace_history_state(target.to_path());
                requested.set(target);
            }
        });
    }
}

fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 等待或重定向期间显示加载提示，放行后渲染对应页面。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收放行的路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision().get() {
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Wait | GuardDecision::Redirect(_) => view! {
            <div class="flex justify-center items-center min-h-[50vh]">
                <span class="loading loading-spinner loading-lg"></span>
            </div>
        }
        .into_any(),
    }
}

/// 站内链接：阻止整页跳转，改走路由服务
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
