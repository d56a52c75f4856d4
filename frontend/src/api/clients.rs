// ====== 客户资源 (Client resource) ======
//
// 管理员与核心用户的客户 CRUD。列表与计数失败时退化为空，
// 写操作返回 Option / bool 供页面提示。

use leptos::logging::warn;

use nexus_hub_shared::Client;
use nexus_hub_shared::protocol::{ClientCreate, ClientRow, ClientUpdate, ReportCountBody};

use crate::api::gateway::ApiGateway;
use crate::api::transport::HttpTransport;
use crate::web::storage::TokenStore;

pub struct ClientsApi<'a, T: HttpTransport, S: TokenStore> {
    gateway: &'a ApiGateway<T, S>,
}

impl<'a, T: HttpTransport, S: TokenStore> ClientsApi<'a, T, S> {
    pub fn new(gateway: &'a ApiGateway<T, S>) -> Self {
        Self { gateway }
    }

    /// 当前账号可见的客户（服务端按创建者过滤）
    pub async fn list(&self) -> Vec<Client> {
        match self.gateway.get_json::<Vec<ClientRow>>("/api/clients/").await {
            Ok(rows) => rows.into_iter().map(Client::from).collect(),
            Err(err) => {
                warn!("failed to load clients: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn create(&self, body: &ClientCreate) -> Option<Client> {
        match self
            .gateway
            .post_json::<_, ClientRow>("/api/clients/", body)
            .await
        {
            Ok(row) => Some(Client::from(row)),
            Err(err) => {
                warn!("failed to create client: {}", err);
                None
            }
        }
    }

    // 改名 / 改门户账号走 PUT，列表页暂未挂编辑入口
    #[allow(dead_code)]
    pub async fn update(&self, id: &str, body: &ClientUpdate) -> bool {
        let path = format!("/api/clients/{id}/");
        match self.gateway.put_json::<_, ClientRow>(&path, body).await {
            Ok(_) => true,
            Err(err) => {
                warn!("failed to update client {}: {}", id, err);
                false
            }
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        let path = format!("/api/clients/{id}/");
        match self.gateway.delete(&path).await {
            Ok(()) => true,
            Err(err) => {
                warn!("failed to delete client {}: {}", id, err);
                false
            }
        }
    }

    /// 单个客户名下的报表数量，用于列表徽标
    pub async fn report_count(&self, id: &str) -> u64 {
        let path = format!("/api/clients/{id}/report-count/");
        match self.gateway.get_json::<ReportCountBody>(&path).await {
            Ok(body) => body.count,
            Err(err) => {
                warn!("failed to load report count for client {}: {}", id, err);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::tests::{MockContext, MockTransport};
    use crate::web::storage::tests::MemoryTokens;
    use nexus_hub_shared::protocol::HttpMethod;
    use std::rc::Rc;

    fn setup() -> (Rc<MockContext>, ApiGateway<MockTransport, MemoryTokens>) {
        let ctx = MockContext::new();
        let gateway = ApiGateway::new(
            MockTransport::new(ctx.clone()),
            MemoryTokens::with_tokens(Some("tok"), None),
            "http://api.test",
        );
        (ctx, gateway)
    }

    #[tokio::test]
    async fn create_posts_snake_case_body() {
        let (ctx, gateway) = setup();
        ctx.push_response(
            201,
            r#"{"id":"c9","company_name":"Acme","username":"acme_portal","created_by":"u1"}"#,
        );

        let body = ClientCreate {
            company_name: "Acme".to_string(),
            username: "acme_portal".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        let client = ClientsApi::new(&gateway).create(&body).await.unwrap();
        assert_eq!(client.id, "c9");

        let request = ctx.request(0);
        assert_eq!(request.method, HttpMethod::Post);
        let wire = request.body.unwrap();
        assert!(wire.contains("\"company_name\":\"Acme\""));
        assert!(wire.contains("\"username\":\"acme_portal\""));
        assert!(!wire.contains("companyName"));
    }

    #[tokio::test]
    async fn create_returns_none_on_rejection() {
        let (ctx, gateway) = setup();
        ctx.push_response(400, r#"{"message":"username taken"}"#);

        let body = ClientCreate {
            company_name: "Acme".to_string(),
            username: "acme_portal".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(ClientsApi::new(&gateway).create(&body).await.is_none());
    }

    #[tokio::test]
    async fn update_targets_the_client_path() {
        let (ctx, gateway) = setup();
        ctx.push_response(
            200,
            r#"{"id":"c9","company_name":"Acme Ltd","username":"acme_portal"}"#,
        );

        let body = ClientUpdate {
            company_name: "Acme Ltd".to_string(),
            username: "acme_portal".to_string(),
        };
        assert!(ClientsApi::new(&gateway).update("c9", &body).await);

        let request = ctx.request(0);
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://api.test/api/clients/c9/");
    }

    #[tokio::test]
    async fn delete_reports_success_and_failure() {
        let (ctx, gateway) = setup();
        ctx.push_response(204, "");
        ctx.push_response(404, r#"{"detail":"Not found"}"#);

        let api = ClientsApi::new(&gateway);
        assert!(api.delete("c9").await);
        assert!(!api.delete("missing").await);
        assert_eq!(ctx.request(0).url, "http://api.test/api/clients/c9/");
    }

    #[tokio::test]
    async fn report_count_defaults_to_zero() {
        let (ctx, gateway) = setup();
        ctx.push_response(200, r#"{"count":5}"#);
        ctx.push_response(500, "");

        let api = ClientsApi::new(&gateway);
        assert_eq!(api.report_count("c1").await, 5);
        assert_eq!(api.report_count("c2").await, 0);
        assert_eq!(
            ctx.request(0).url,
            "http://api.test/api/clients/c1/report-count/"
        );
    }
}
