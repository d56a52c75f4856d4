//! Wire format of the REST service.
//!
//! Row types mirror the server's snake_case JSON. Columns the server may omit
//! carry `#[serde(default)]` so one missing field never fails a whole fetch.
//! Translation to the domain types happens through the `From` impls here and
//! nowhere else.

use crate::{Client, Report, ReportType, SubscriptionPlan, User, UserRole};
use serde::{Deserialize, Serialize};

/// HTTP methods used by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =========================================================
// Auth payloads
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful login: a token pair plus the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
    pub refresh: String,
    pub user: UserRow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Logout hands the refresh token back so the server can blacklist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

/// Minimal acknowledgement body ({"success": true} and friends).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
}

/// Core-user self registration, posted verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreUserRegistration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub company_name: String,
    pub business_type: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UserCounts {
    pub total_users: u64,
    pub core_users: u64,
    pub client_users: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportCountBody {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRequest {
    pub plan: SubscriptionPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub subscription: Option<SubscriptionPlan>,
    #[serde(default)]
    pub subscription_expiry: Option<String>,
}

/// Error body shapes vary by endpoint (DRF `detail`, custom `message`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First human-readable message the body carries, if any.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.detail).or(self.error)
    }
}

// =========================================================
// User rows
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub subscription: Option<SubscriptionPlan>,
    #[serde(default)]
    pub subscription_expiry: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Server-computed display name; the domain type derives its own.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            first_name: row.first_name.unwrap_or_default(),
            last_name: row.last_name.unwrap_or_default(),
            role: row.role,
            phone_number: row.phone_number,
            company_name: row.company_name,
            business_type: row.business_type,
            subscription: row.subscription,
            subscription_expiry: row.subscription_expiry,
            created_at: row.created_at.unwrap_or_default(),
            status: row.status,
        }
    }
}

// =========================================================
// Client rows
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: String,
    pub company_name: String,
    pub username: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub client_profile_id: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            company_name: row.company_name,
            username: row.username,
            created_by: row.created_by.unwrap_or_default(),
            created_at: row.created_at.unwrap_or_default(),
            client_profile_id: row.client_profile_id,
        }
    }
}

/// Create body for POST /api/clients/ (the password is write-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub company_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub company_name: String,
    pub username: String,
}

// =========================================================
// Report rows
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub power_bi_embed_url: String,
    #[serde(rename = "type", default)]
    pub kind: ReportType,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Report {
            id: row.id,
            name: row.name,
            client_id: row.client_id,
            power_bi_embed_url: row.power_bi_embed_url,
            kind: row.kind,
            created_by: row.created_by.unwrap_or_default(),
            created_at: row.created_at.unwrap_or_default(),
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCreate {
    pub name: String,
    pub client_id: String,
    pub power_bi_embed_url: String,
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub name: String,
    pub power_bi_embed_url: String,
    #[serde(rename = "type")]
    pub kind: ReportType,
}
