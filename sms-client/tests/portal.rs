//! Client tests against a local HTTP server.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use url::Url;

use sms_client::cookie::StaticCookies;
use sms_client::error::{ApiError, Error};
use sms_client::{DeleteResponse, PortalClient};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path_and_query: String,
    csrf: Option<String>,
    content_type: Option<String>,
}

type Handler = fn(&str) -> (StatusCode, &'static str, &'static str);

/// Serve every connection with `handler`, recording each request.
async fn serve(handler: Handler) -> (Url, Arc<Mutex<Vec<Seen>>>) {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let log = log.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let log = log.clone();
                    async move {
                        let header = |name: &str| {
                            req.headers()
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string)
                        };
                        let path_and_query = req
                            .uri()
                            .path_and_query()
                            .map(|p| p.to_string())
                            .unwrap_or_default();
                        log.lock().unwrap().push(Seen {
                            method: req.method().to_string(),
                            path_and_query: path_and_query.clone(),
                            csrf: header("x-csrftoken"),
                            content_type: header("content-type"),
                        });

                        let (status, content_type, body) = handler(&path_and_query);
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", content_type)
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (Url::parse(&format!("http://{addr}/")).unwrap(), seen)
}

fn client(base: &Url, cookies: &str) -> PortalClient {
    PortalClient::builder()
        .url(base.clone())
        .cookies(StaticCookies::new(cookies))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_sends_csrf_and_json_headers() {
    let (base, seen) = serve(|_| {
        (
            StatusCode::OK,
            "application/json",
            r#"{"success": true, "message": "Student deleted."}"#,
        )
    })
    .await;

    let outcome = client(&base, "sessionid=x; csrftoken=tok%3D1")
        .delete_student(7)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DeleteResponse {
            success: true,
            message: "Student deleted.".to_string()
        }
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path_and_query, "/students/7/delete-ajax/");
    assert_eq!(seen[0].csrf.as_deref(), Some("tok=1"));
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_delete_business_failure_is_ok() {
    let (base, _) = serve(|_| {
        (
            StatusCode::BAD_REQUEST,
            "application/json",
            r#"{"success": false, "message": "Student has active enrollments."}"#,
        )
    })
    .await;

    let outcome = client(&base, "csrftoken=t").delete_student(3).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, "Student has active enrollments.");
}

#[tokio::test]
async fn test_delete_non_json_is_parse_error() {
    let (base, _) = serve(|_| (StatusCode::FORBIDDEN, "text/html", "<h1>CSRF failed</h1>")).await;

    let err = client(&base, "").delete_student(3).await.unwrap_err();
    match err {
        Error::Api(ApiError::Parse { body, .. }) => {
            assert_eq!(body.as_deref(), Some("<h1>CSRF failed</h1>"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_without_cookie_omits_header() {
    let (base, seen) = serve(|_| {
        (
            StatusCode::OK,
            "application/json",
            r#"{"success": true, "message": "ok"}"#,
        )
    })
    .await;

    client(&base, "").delete_student(1).await.unwrap();
    assert_eq!(seen.lock().unwrap()[0].csrf, None);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_requests_page_with_export_flag() {
    let (base, seen) = serve(|_| (StatusCode::OK, "text/plain", "id,name\n1,Ada\n")).await;
    let page = base.join("/students/list/?search=ada&page=2").unwrap();

    let file = client(&base, "").export(&page).await.unwrap();

    assert_eq!(file.bytes, b"id,name\n1,Ada\n");
    assert_eq!(file.content_type.as_deref(), Some("text/plain"));
    assert_eq!(
        seen.lock().unwrap()[0].path_and_query,
        "/students/list/?search=ada&page=2&export=true"
    );
}

#[tokio::test]
async fn test_export_error_status() {
    let (base, _) = serve(|_| (StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "boom")).await;
    let page = base.join("/students/list/").unwrap();

    let err = client(&base, "").export(&page).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_export_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let err = client(&base, "").export(&base).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Network(_))));
}

#[test]
fn test_delete_url_is_absolute_path() {
    let base = Url::parse("http://localhost:8000/app/students/list/").unwrap();
    let url = client(&base, "").delete_url(12).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/students/12/delete-ajax/");
}
