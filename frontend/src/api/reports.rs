// ====== 报表资源 (Report resource) ======
//
// Power BI 报表的 CRUD。客户角色由服务端限定可见范围，
// 前端只负责可选的 client_id 过滤。

use leptos::logging::warn;

use nexus_hub_shared::Report;
use nexus_hub_shared::protocol::{ReportCreate, ReportRow, ReportUpdate};

use crate::api::gateway::ApiGateway;
use crate::api::transport::HttpTransport;
use crate::web::storage::TokenStore;

pub struct ReportsApi<'a, T: HttpTransport, S: TokenStore> {
    gateway: &'a ApiGateway<T, S>,
}

impl<'a, T: HttpTransport, S: TokenStore> ReportsApi<'a, T, S> {
    pub fn new(gateway: &'a ApiGateway<T, S>) -> Self {
        Self { gateway }
    }

    /// 当前账号可见的全部报表
    pub async fn list(&self) -> Vec<Report> {
        self.fetch("/api/reports/").await
    }

    /// 按客户过滤的报表
    pub async fn list_for_client(&self, client_id: &str) -> Vec<Report> {
        let path = format!("/api/reports/?client_id={client_id}");
        self.fetch(&path).await
    }

    async fn fetch(&self, path: &str) -> Vec<Report> {
        match self.gateway.get_json::<Vec<ReportRow>>(path).await {
            Ok(rows) => rows.into_iter().map(Report::from).collect(),
            Err(err) => {
                warn!("failed to load reports: {}", err);
                Vec::new()
            }
        }
    }

    /// 单条报表（查看器直接从列表取数，此处留给按 id 读取的场景）
    #[allow(dead_code)]
    pub async fn get(&self, id: &str) -> Option<Report> {
        let path = format!("/api/reports/{id}/");
        match self.gateway.get_json::<ReportRow>(&path).await {
            Ok(row) => Some(Report::from(row)),
            Err(err) => {
                if !err.is_not_found() {
                    warn!("failed to load report {}: {}", id, err);
                }
                None
            }
        }
    }

    pub async fn create(&self, body: &ReportCreate) -> Option<Report> {
        match self
            .gateway
            .post_json::<_, ReportRow>("/api/reports/", body)
            .await
        {
            Ok(row) => Some(Report::from(row)),
            Err(err) => {
                warn!("failed to create report: {}", err);
                None
            }
        }
    }

    // 重命名 / 换嵌入地址走同一 PUT，页面目前只建不改
    #[allow(dead_code)]
    pub async fn update(&self, id: &str, body: &ReportUpdate) -> bool {
        let path = format!("/api/reports/{id}/");
        match self.gateway.put_json::<_, ReportRow>(&path, body).await {
            Ok(_) => true,
            Err(err) => {
                warn!("failed to update report {}: {}", id, err);
                false
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        let path = format!("/api/reports/{id}/");
        match self.gateway.delete(&path).await {
            Ok(()) => true,
            Err(err) => {
                warn!("failed to delete report {}: {}", id, err);
                false
            }
        }
    }
}
