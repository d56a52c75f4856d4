//! 令牌持久化
//!
//! localStorage 是会话令牌的唯一持久层，键名与历史部署保持一致。
//! 其余代码一律通过 `TokenStore` 访问，不直接触碰浏览器存储。

use leptos::logging::warn;

/// 访问令牌的存储键
pub const ACCESS_TOKEN_KEY: &str = "authToken";
/// 刷新令牌的存储键
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

// =========================================================
// 抽象存储接口
// =========================================================

pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// 登录成功后写入完整令牌对
    fn store_pair(&self, access: &str, refresh: &str);
    /// 刷新成功后只替换访问令牌
    fn replace_access(&self, access: &str);
    /// 清除两个令牌（注销、刷新失败）
    fn clear(&self);
}

// =========================================================
// 生产环境实现 (localStorage)
// =========================================================

/// 原样读写 localStorage（令牌不做 JSON 包装，与既有部署互通）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserTokens;

impl BrowserTokens {
    fn read(key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(key: &str, value: &str) {
        use gloo_storage::{LocalStorage, Storage};
        // 隐私模式下写入可能被拒绝，只记录不中断流程
        if LocalStorage::raw().set_item(key, value).is_err() {
            warn!("token persist failed: local storage unavailable");
        }
    }

    fn remove(key: &str) {
        use gloo_storage::{LocalStorage, Storage};
        let _ = LocalStorage::raw().remove_item(key);
    }
}

impl TokenStore for BrowserTokens {
    fn access_token(&self) -> Option<String> {
        Self::read(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::read(REFRESH_TOKEN_KEY)
    }

    fn store_pair(&self, access: &str, refresh: &str) {
        Self::write(ACCESS_TOKEN_KEY, access);
        Self::write(REFRESH_TOKEN_KEY, refresh);
    }

    fn replace_access(&self, access: &str) {
        Self::write(ACCESS_TOKEN_KEY, access);
    }

    fn clear(&self) {
        Self::remove(ACCESS_TOKEN_KEY);
        Self::remove(REFRESH_TOKEN_KEY);
    }
}

// =========================================================
// 测试环境实现 (Memory)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct MemoryTokens {
        access: RefCell<Option<String>>,
        refresh: RefCell<Option<String>>,
    }

    impl MemoryTokens {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
            Self {
                access: RefCell::new(access.map(str::to_string)),
                refresh: RefCell::new(refresh.map(str::to_string)),
            }
        }
    }

    impl TokenStore for MemoryTokens {
        fn access_token(&self) -> Option<String> {
            self.access.borrow().clone()
        }

        fn refresh_token(&self) -> Option<String> {
            self.refresh.borrow().clone()
        }

        fn store_pair(&self, access: &str, refresh: &str) {
            *self.access.borrow_mut() = Some(access.to_string());
            *self.refresh.borrow_mut() = Some(refresh.to_string());
        }

        fn replace_access(&self, access: &str) {
            *self.access.borrow_mut() = Some(access.to_string());
        }

        fn clear(&self) {
            *self.access.borrow_mut() = None;
            *self.refresh.borrow_mut() = None;
        }
    }
}
