//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到注册对象的转换

use leptos::prelude::*;
use nexus_hub_shared::ClientRegistration;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在组件内的
/// 多个闭包间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub company_name: RwSignal<String>,
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            company_name: RwSignal::new(String::new()),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.company_name.set(String::new());
        self.username.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
    }

    /// 将表单状态转换为注册对象，校验交给 `ClientRegistration`
    pub fn to_registration(&self) -> ClientRegistration {
        ClientRegistration {
            company_name: self.company_name.get(),
            username: self.username.get(),
            password: self.password.get(),
            confirm_password: self.confirm_password.get(),
        }
    }
}
