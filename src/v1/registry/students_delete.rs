#![forbid(unsafe_code)]

use anyhow::Result;
use poem::Request;
use poem_openapi::{param::Path, payload::Json, ApiResponse, Object, OpenApi};
use std::sync::Arc;

use crate::utils::errors::HttpResult;
use crate::utils::srv_utils::{self, RequestDebug};
use crate::utils::store::StudentStore;
use log::{error, info};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct DeleteStudentApi {
    store: Arc<StudentStore>,
}

impl DeleteStudentApi {
    pub fn new(store: Arc<StudentStore>) -> Self {
        Self { store }
    }
}

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
#[derive(Object)]
pub struct ReqDeleteStudent
{
    student_id: String,
}

#[derive(Object, Debug)]
pub struct RespDeleteStudent
{
    result_code: String,
    result_msg: String,
    num_deleted: u32,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqDeleteStudent {
    type Req = ReqDeleteStudent;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    student_id: ");
        s.push_str(&self.student_id);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum RegistryResponse {
    #[oai(status = 200)]
    Http200(Json<RespDeleteStudent>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(resp: RespDeleteStudent) -> RegistryResponse {
    RegistryResponse::Http200(Json(resp))
}
fn make_http_500(msg: String) -> RegistryResponse {
    RegistryResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DeleteStudentApi {
    #[oai(path = "/registry/student_db/:student_id", method = "delete")]
    async fn delete_student(&self, http_req: &Request, student_id: Path<String>) -> RegistryResponse {
        // Package the request parameters.
        let req = ReqDeleteStudent { student_id: student_id.to_string() };

        // Conditional logging depending on log level.
        srv_utils::debug_request(http_req, &req);

        // -------------------- Process Request ----------------------
        // Process the request.
        match RespDeleteStudent::process(&self.store, &req) {
            Ok(r) => r,
            Err(e) => {
                let msg = "ERROR: ".to_owned() + e.to_string().as_str();
                error!("{}", msg);
                make_http_500(msg)
            }
        }
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespDeleteStudent {
    /// Create a new response.
    fn new(result_code: &str, result_msg: String, num_deleted: u32) -> Self {
        Self {result_code: result_code.to_string(), result_msg, num_deleted,}}

    /// Process the request.
    fn process(store: &StudentStore, req: &ReqDeleteStudent) -> Result<RegistryResponse, anyhow::Error> {
        // Remove the first matching record; a miss is a counted no-op.
        let deletes = store.delete(&req.student_id);

        // Log result and return response.
        let msg =
            if deletes < 1 {format!("Student {} NOT FOUND - Nothing deleted", req.student_id)}
            else {format!("Student {} deleted", req.student_id)};
        info!("{}", msg);
        Ok(make_http_200(RespDeleteStudent::new("0", msg, deletes as u32)))
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    fn body(resp: RegistryResponse) -> RespDeleteStudent {
        match resp {
            RegistryResponse::Http200(Json(body)) => body,
            other => panic!("expected 200, got {:?}", other),
        }
    }

    #[test]
    fn delete_hit_reports_one_removed() {
        let store = StudentStore::seeded();
        let req = ReqDeleteStudent { student_id: "20240001".to_string() };
        let resp = body(RespDeleteStudent::process(&store, &req).expect("process failed"));
        assert_eq!(resp.num_deleted, 1);
        assert!(store.get("20240001").is_none());
        assert!(store.get("20240002").is_some());
    }

    #[test]
    fn delete_miss_reports_zero_removed() {
        let store = StudentStore::seeded();
        let req = ReqDeleteStudent { student_id: "99999999".to_string() };
        let resp = body(RespDeleteStudent::process(&store, &req).expect("process failed"));
        assert_eq!(resp.num_deleted, 0);
        assert!(resp.result_msg.contains("NOT FOUND"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn repeat_delete_is_a_noop() {
        let store = StudentStore::seeded();
        let req = ReqDeleteStudent { student_id: "20240002".to_string() };
        assert_eq!(body(RespDeleteStudent::process(&store, &req).unwrap()).num_deleted, 1);
        assert_eq!(body(RespDeleteStudent::process(&store, &req).unwrap()).num_deleted, 0);
        assert_eq!(store.len(), 1);
    }
}
