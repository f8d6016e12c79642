#![forbid(unsafe_code)]

use anyhow::Result;
use poem::Request;
use poem_openapi::{param::Path, payload::Json, ApiResponse, Object, OpenApi};
use std::sync::Arc;

use crate::utils::errors::HttpResult;
use crate::utils::srv_utils::{self, RequestDebug};
use crate::utils::store::StudentStore;
use log::error;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GetStudentApi {
    store: Arc<StudentStore>,
}

impl GetStudentApi {
    pub fn new(store: Arc<StudentStore>) -> Self {
        Self { store }
    }
}

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
#[derive(Object)]
struct ReqGetStudent
{
    student_id: String,
}

#[derive(Object, Debug)]
pub struct RespGetStudent
{
    result_code: String,
    result_msg: String,
    student_id: String,
    student_name: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetStudent {
    type Req = ReqGetStudent;
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
    Http200(Json<RespGetStudent>),
    #[oai(status = 404)]
    Http404(Json<HttpResult>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(resp: RespGetStudent) -> RegistryResponse {
    RegistryResponse::Http200(Json(resp))
}
fn make_http_404(msg: String) -> RegistryResponse {
    RegistryResponse::Http404(Json(HttpResult::new(404.to_string(), msg)))
}
fn make_http_500(msg: String) -> RegistryResponse {
    RegistryResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GetStudentApi {
    #[oai(path = "/registry/student_db/:student_id", method = "get")]
    async fn get_student_api(&self, http_req: &Request, student_id: Path<String>) -> RegistryResponse {
        // Package the request parameters.
        let req = ReqGetStudent { student_id: student_id.to_string() };

        // Conditional logging depending on log level.
        srv_utils::debug_request(http_req, &req);

        // -------------------- Process Request ----------------------
        // Process the request.
        match RespGetStudent::process(&self.store, &req) {
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
impl RespGetStudent {
    /// Create a new response.
    fn new(result_code: &str, result_msg: String, student_id: String, student_name: String) -> Self {
        Self {result_code: result_code.to_string(), result_msg, student_id, student_name}
    }

    /// Process the request.
    fn process(store: &StudentStore, req: &ReqGetStudent) -> Result<RegistryResponse, anyhow::Error> {
        // Search for the student id in the registry.  The miss is reported
        // explicitly rather than with an empty body.
        match store.get(&req.student_id) {
            Some(rec) => Ok(make_http_200(Self::new("0", "success".to_string(),
                                    rec.student_id, rec.student_name))),
            None => {
                let msg = format!("Student {} NOT FOUND", req.student_id);
                Ok(make_http_404(msg))
            },
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use poem_openapi::types::ToJSON;

    #[test]
    fn get_hit_returns_the_record() {
        let store = StudentStore::seeded();
        let req = ReqGetStudent { student_id: "20240001".to_string() };
        let resp = RespGetStudent::process(&store, &req).expect("process failed");
        match resp {
            RegistryResponse::Http200(Json(body)) => {
                assert_eq!(body.student_id, "20240001");
                assert_eq!(body.student_name, "A");
                assert_eq!(body.result_code, "0");
            }
            other => panic!("expected 200, got {:?}", other),
        }
    }

    #[test]
    fn get_miss_returns_404() {
        let store = StudentStore::seeded();
        let req = ReqGetStudent { student_id: "99999999".to_string() };
        let resp = RespGetStudent::process(&store, &req).expect("process failed");
        match resp {
            RegistryResponse::Http404(Json(body)) => {
                assert_eq!(body.result_code, "404");
                assert!(body.result_msg.contains("99999999"));
            }
            other => panic!("expected 404, got {:?}", other),
        }
    }

    #[test]
    fn response_body_json_shape() {
        let resp = RespGetStudent::new("0", "success".to_string(),
                                       "20240001".to_string(), "A".to_string());
        let json = resp.to_json().expect("no json value");
        assert_eq!(json["student_id"], "20240001");
        assert_eq!(json["student_name"], "A");
    }
}
