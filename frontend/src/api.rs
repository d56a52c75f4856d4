// ====== API 层 (API layer) ======
//
// 网关负责令牌注入与 401 刷新重放，资源客户端在其上提供
// users / clients / reports 的类型化调用。

pub mod clients;
pub mod error;
pub mod gateway;
pub mod reports;
pub mod transport;
pub mod users;
