//! 客户端配置
//!
//! 后端地址在编译期确定（可用 `MENTORLINK_API_BASE` 构建变量覆盖），运行期不可修改。

use mentorlink_shared::Role;

// =========================================================
// 默认值
// =========================================================

const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
const DEFAULT_ASSET_BASE: &str = "http://localhost:8080";
const DEFAULT_TOKEN_KEY: &str = "token";
const DEFAULT_PLACEHOLDER_BASE: &str = "https://placehold.co/500x500.jpg";
const DEFAULT_MAX_IMAGE_BYTES: u64 = 1024 * 1024;
const DEFAULT_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// 客户端配置
///
/// 启动时构建一次，通过 `Arc` 在网关客户端和各页面间共享。
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API 基地址，例如 `http://localhost:8080/api`
    pub api_base_url: String,
    /// 静态资源基地址，拼接在用户的 `imageUrl` 前面
    pub asset_base_url: String,
    /// LocalStorage 中保存令牌的键名
    pub token_storage_key: String,
    /// 头像上传大小上限（字节）
    pub max_image_bytes: u64,
    pub accepted_image_types: Vec<String>,
    /// 头像加载失败时的占位图地址
    pub placeholder_image_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("MENTORLINK_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            asset_base_url: DEFAULT_ASSET_BASE.to_string(),
            token_storage_key: DEFAULT_TOKEN_KEY.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            accepted_image_types: DEFAULT_IMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
            placeholder_image_base: DEFAULT_PLACEHOLDER_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    /// 拼接 API 路径
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }

    /// 用户头像的完整地址
    pub fn image_url(&self, image_url: &str) -> String {
        format!("{}{}", self.asset_base_url.trim_end_matches('/'), image_url)
    }

    /// 按角色区分的占位图
    pub fn placeholder_image(&self, role: Role) -> String {
        format!(
            "{}?text={}",
            self.placeholder_image_base,
            role.as_str().to_uppercase()
        )
    }

    pub fn accepts_image_type(&self, mime: &str) -> bool {
        self.accepted_image_types.iter().any(|t| t == mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined() {
        let config = ClientConfig {
            api_base_url: "http://api.test/api".into(),
            asset_base_url: "http://api.test/".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.api_url("/me"), "http://api.test/api/me");
        assert_eq!(config.api_url("me"), "http://api.test/api/me");
        assert_eq!(
            config.image_url("/api/images/mentor/3"),
            "http://api.test/api/images/mentor/3"
        );
    }

    #[test]
    fn placeholder_is_per_role() {
        let config = ClientConfig::default();
        assert_eq!(
            config.placeholder_image(Role::Mentor),
            "https://placehold.co/500x500.jpg?text=MENTOR"
        );
        assert!(config.placeholder_image(Role::Mentee).ends_with("MENTEE"));
    }

    #[test]
    fn only_jpeg_and_png() {
        let config = ClientConfig::default();
        assert!(config.accepts_image_type("image/png"));
        assert!(config.accepts_image_type("image/jpeg"));
        assert!(!config.accepts_image_type("image/gif"));
    }
}
