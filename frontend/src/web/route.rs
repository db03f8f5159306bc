//! 路由定义与守卫 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM。守卫只看会话快照做决定，
//! 因此可以在原生环境下直接测试。

use std::fmt::Display;

use mentorlink_shared::{Capability, Role};

use crate::session::SessionState;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 根路径：按登录状态转到资料页或登录页
    #[default]
    Home,
    Login,
    Signup,
    Profile,
    Mentors,
    Requests,
    NotFound,
}

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 任何人可见
    Public,
    /// 仅未登录可见（登录、注册）
    PublicOnly,
    /// 需要登录
    Protected,
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在解析，暂不决定
    Wait,
    Render(AppRoute),
    /// 替换当前历史记录并跳转
    Redirect(AppRoute),
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/profile" => Self::Profile,
            "/mentors" => Self::Mentors,
            "/requests" => Self::Requests,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Profile => "/profile",
            Self::Mentors => "/mentors",
            Self::Requests => "/requests",
            Self::NotFound => "/404",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Home | Self::NotFound => Access::Public,
            Self::Login | Self::Signup => Access::PublicOnly,
            Self::Profile | Self::Mentors | Self::Requests => Access::Protected,
        }
    }

    /// 导航栏显示此入口所需的能力
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::Mentors => Some(Capability::BrowseMentors),
            _ => None,
        }
    }

    pub fn nav_label(&self, role: Role) -> &'static str {
        match (self, role) {
            (Self::Profile, _) => "Profile",
            (Self::Mentors, _) => "Mentors",
            (Self::Requests, Role::Mentor) => "Incoming requests",
            (Self::Requests, Role::Mentee) => "My requests",
            _ => "",
        }
    }

    /// 登录失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已登录用户离开公开页时的目标
    pub fn auth_success_redirect() -> Self {
        Self::Profile
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// **核心守卫逻辑**
///
/// 会话仍在解析时一律等待（404 除外），避免刷新页面时被误判为未登录。
pub fn guard(route: AppRoute, session: &SessionState) -> GuardDecision {
    if route == AppRoute::NotFound {
        return GuardDecision::Render(route);
    }
    if session.loading {
        return GuardDecision::Wait;
    }

    let authenticated = session.is_authenticated();
    match (route.access(), authenticated) {
        _ if route == AppRoute::Home => GuardDecision::Redirect(if authenticated {
            AppRoute::auth_success_redirect()
        } else {
            AppRoute::auth_failure_redirect()
        }),
        (Access::Protected, false) => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        (Access::PublicOnly, true) => GuardDecision::Redirect(AppRoute::auth_success_redirect()),
        _ => GuardDecision::Render(route),
    }
}

/// 某角色导航栏中的入口
pub fn nav_links(role: Role) -> Vec<AppRoute> {
    [AppRoute::Profile, AppRoute::Mentors, AppRoute::Requests]
        .into_iter()
        .filter(|r| r.required_capability().is_none_or(|c| role.can(c)))
        .collect()
}
