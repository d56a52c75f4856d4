//! 共享领域模型
//!
//! 前端与 REST 服务共用的类型定义：
//! - 角色与订阅套餐枚举（封闭集合，穷尽匹配）
//! - 实体类型 `User` / `Client` / `Report`
//! - 客户端容量规则与订阅定价目录
//!
//! 线格式（snake_case 行类型）见 `protocol`，时间展示见 `date`。

pub mod date;
pub mod protocol;

use serde::{Deserialize, Serialize};

// =========================================================
// 角色与订阅 (Roles & Plans)
// =========================================================

/// 用户角色
///
/// 服务端以 snake_case 字符串传输（"admin" / "core_user" / "client"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    CoreUser,
    Client,
}

impl UserRole {
    /// 展示用名称
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::CoreUser => "Core User",
            UserRole::Client => "Client",
        }
    }
}

/// 订阅套餐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Professional,
    Enterprise,
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        SubscriptionPlan::Free
    }
}

impl SubscriptionPlan {
    /// 套餐允许的客户端账号上限
    pub fn client_limit(&self) -> usize {
        match self {
            SubscriptionPlan::Free => 3,
            SubscriptionPlan::Professional => 10,
            SubscriptionPlan::Enterprise => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "Free",
            SubscriptionPlan::Professional => "Professional",
            SubscriptionPlan::Enterprise => "Enterprise",
        }
    }
}

/// 报表类型
///
/// 服务端以首字母大写形式存储（"Dashboard" / "Report"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    Dashboard,
    Report,
}

impl Default for ReportType {
    fn default() -> Self {
        ReportType::Report
    }
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Dashboard => "Dashboard",
            ReportType::Report => "Report",
        }
    }
}

// =========================================================
// 实体 (Entities)
// =========================================================

/// 平台用户
///
/// 时间字段保持服务端原始字符串，展示时经 `date` 模块宽容解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub phone_number: Option<String>,
    pub company_name: Option<String>,
    pub business_type: Option<String>,
    pub subscription: Option<SubscriptionPlan>,
    pub subscription_expiry: Option<String>,
    pub created_at: String,
    pub status: Option<String>,
}

impl User {
    /// 姓名展示，缺失时退回邮箱
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// 生效的订阅套餐（未设置视为 Free）
    pub fn plan(&self) -> SubscriptionPlan {
        self.subscription.unwrap_or_default()
    }
}

/// 客户端账号（由核心用户或管理员创建）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub company_name: String,
    pub username: String,
    pub created_by: String,
    pub created_at: String,
    pub client_profile_id: Option<String>,
}

/// Power BI 报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub name: String,
    pub client_id: String,
    pub power_bi_embed_url: String,
    pub kind: ReportType,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

// =========================================================
// 客户端注册表单 (Client Registration)
// =========================================================

/// 新建客户端账号的本地表单模型
///
/// `confirm_password` 只用于提交前校验，不出现在线格式中。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientRegistration {
    pub company_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl ClientRegistration {
    /// 提交前校验，返回第一条用户可读的错误
    pub fn validate(&self) -> Result<(), String> {
        if self.company_name.trim().is_empty() {
            return Err("Company name is required".to_string());
        }
        if self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }

    /// 转换为创建请求的线格式（确认密码不发送）
    pub fn to_wire(&self) -> protocol::ClientCreate {
        protocol::ClientCreate {
            company_name: self.company_name.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

// =========================================================
// 容量规则 (Capacity Rules)
// =========================================================

/// 角色与订阅对应的客户端容量，`None` 表示不限
pub fn client_capacity(role: UserRole, plan: Option<SubscriptionPlan>) -> Option<usize> {
    match role {
        UserRole::Admin => None,
        UserRole::CoreUser => Some(plan.unwrap_or_default().client_limit()),
        UserRole::Client => Some(0),
    }
}

/// 当前数量下是否还允许新建客户端账号
pub fn can_add_client(role: UserRole, plan: Option<SubscriptionPlan>, current_count: usize) -> bool {
    match client_capacity(role, plan) {
        None => true,
        Some(limit) => current_count < limit,
    }
}

// =========================================================
// 订阅定价目录 (Pricing Catalog)
// =========================================================

/// 落地页与升级界面共用的套餐展示信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingTier {
    pub plan: SubscriptionPlan,
    pub price: &'static str,
    pub period: &'static str,
    pub tagline: &'static str,
    pub features: &'static [&'static str],
    pub highlighted: bool,
}

impl PricingTier {
    pub fn all() -> [PricingTier; 3] {
        [
            PricingTier {
                plan: SubscriptionPlan::Free,
                price: "$0",
                period: "/month",
                tagline: "Get started with Power BI sharing",
                features: &[
                    "Up to 3 client accounts",
                    "Embedded Power BI reports",
                    "Email support",
                ],
                highlighted: false,
            },
            PricingTier {
                plan: SubscriptionPlan::Professional,
                price: "$29",
                period: "/month",
                tagline: "For growing consultancies",
                features: &[
                    "Up to 10 client accounts",
                    "Embedded Power BI reports",
                    "Dashboard and report types",
                    "Priority support",
                ],
                highlighted: true,
            },
            PricingTier {
                plan: SubscriptionPlan::Enterprise,
                price: "$99",
                period: "/month",
                tagline: "For large organizations",
                features: &[
                    "Up to 30 client accounts",
                    "Embedded Power BI reports",
                    "Dashboard and report types",
                    "Dedicated support",
                ],
                highlighted: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole, plan: Option<SubscriptionPlan>) -> User {
        User {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role,
            phone_number: None,
            company_name: None,
            business_type: None,
            subscription: plan,
            subscription_expiry: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            status: None,
        }
    }

    #[test]
    fn free_plan_caps_at_three_clients() {
        let role = UserRole::CoreUser;
        assert!(can_add_client(role, Some(SubscriptionPlan::Free), 2));
        assert!(!can_add_client(role, Some(SubscriptionPlan::Free), 3));
        assert!(!can_add_client(role, Some(SubscriptionPlan::Free), 4));
    }

    #[test]
    fn missing_plan_counts_as_free() {
        assert_eq!(client_capacity(UserRole::CoreUser, None), Some(3));
        assert!(!can_add_client(UserRole::CoreUser, None, 3));
    }

    #[test]
    fn professional_plan_caps_at_ten() {
        let plan = Some(SubscriptionPlan::Professional);
        assert!(can_add_client(UserRole::CoreUser, plan, 9));
        assert!(!can_add_client(UserRole::CoreUser, plan, 10));
    }

    #[test]
    fn enterprise_plan_caps_at_thirty() {
        let plan = Some(SubscriptionPlan::Enterprise);
        assert!(can_add_client(UserRole::CoreUser, plan, 29));
        assert!(!can_add_client(UserRole::CoreUser, plan, 30));
    }

    #[test]
    fn admin_capacity_is_unlimited() {
        assert_eq!(client_capacity(UserRole::Admin, None), None);
        assert!(can_add_client(UserRole::Admin, None, 10_000));
    }

    #[test]
    fn client_role_cannot_create_clients() {
        assert!(!can_add_client(
            UserRole::Client,
            Some(SubscriptionPlan::Enterprise),
            0
        ));
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        let form = ClientRegistration {
            company_name: "Acme".to_string(),
            username: "acme".to_string(),
            password: "secret-pass".to_string(),
            confirm_password: "secret-typo".to_string(),
        };
        assert_eq!(form.validate(), Err("Passwords do not match".to_string()));
    }

    #[test]
    fn registration_rejects_short_password() {
        let form = ClientRegistration {
            company_name: "Acme".to_string(),
            username: "acme".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn registration_accepts_valid_form() {
        let form = ClientRegistration {
            company_name: "Acme".to_string(),
            username: "acme".to_string(),
            password: "secret-pass".to_string(),
            confirm_password: "secret-pass".to_string(),
        };
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn wire_form_drops_confirm_password() {
        let form = ClientRegistration {
            company_name: "Acme".to_string(),
            username: "acme".to_string(),
            password: "secret-pass".to_string(),
            confirm_password: "secret-pass".to_string(),
        };
        let wire = form.to_wire();
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"company_name\":\"Acme\""));
        assert!(!json.contains("confirm"));
    }

    #[test]
    fn full_name_falls_back_to_email() {
        let mut user = sample_user(UserRole::Client, None);
        assert_eq!(user.full_name(), "Ada Lovelace");
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.full_name(), "ada@example.com");
    }

    #[test]
    fn roles_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::CoreUser).unwrap(),
            "\"core_user\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"admin\"").unwrap(),
            UserRole::Admin
        );
    }

    #[test]
    fn plans_serialize_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::Professional).unwrap(),
            "\"professional\""
        );
    }

    #[test]
    fn pricing_catalog_matches_plan_limits() {
        for tier in PricingTier::all() {
            let cap = tier.plan.client_limit();
            assert!(
                tier.features
                    .iter()
                    .any(|f| f.contains(&cap.to_string())),
                "tier {} should mention its client cap",
                tier.plan.label()
            );
        }
    }
}
