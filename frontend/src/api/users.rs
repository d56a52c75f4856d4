// ====== 用户资源 (User resource) ======
//
// 仅管理员页面使用。请求失败时记录日志并退化为空结果，
// 页面照常渲染。

use leptos::logging::warn;

use nexus_hub_shared::User;
use nexus_hub_shared::protocol::{UserCounts, UserRow};

use crate::api::gateway::ApiGateway;
use crate::api::transport::HttpTransport;
use crate::web::storage::TokenStore;

pub struct UsersApi<'a, T: HttpTransport, S: TokenStore> {
    gateway: &'a ApiGateway<T, S>,
}

impl<'a, T: HttpTransport, S: TokenStore> UsersApi<'a, T, S> {
    pub fn new(gateway: &'a ApiGateway<T, S>) -> Self {
        Self { gateway }
    }

    /// 全量用户列表
    pub async fn list(&self) -> Vec<User> {
        match self
            .gateway
            .get_json::<Vec<UserRow>>("/api/auth/users/")
            .await
        {
            Ok(rows) => rows.into_iter().map(User::from).collect(),
            Err(err) => {
                warn!("failed to load users: {}", err);
                Vec::new()
            }
        }
    }

    /// 平台用户统计
    pub async fn counts(&self) -> Option<UserCounts> {
        match self.gateway.get_json::<UserCounts>("/api/user-counts/").await {
            Ok(counts) => Some(counts),
            Err(err) => {
                warn!("failed to load user counts: {}", err);
                None
            }
        }
    }
}
