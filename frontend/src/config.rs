//! 运行时配置
//!
//! 后端地址在编译期通过 `NEXUS_HUB_API_URL` 注入（Trunk 会透传环境变量），
//! 未设置时指向本地开发服务器。

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// API 基础地址，末尾斜杠已归一化
pub fn api_base_url() -> String {
    option_env!("NEXUS_HUB_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}
