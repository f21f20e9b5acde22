//! Dispatch tests against a local mock server.

use std::time::Duration;

use fmp_lib::operations::SymbolParams;
use fmp_lib::{
    ApiError, CallContext, Client, ClientConfig, ClientError, OperationId, ParameterBag,
    RetryConfig, ValidationError,
};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client(server: &MockServer) -> Client {
    Client::new(
        ClientConfig::new(API_KEY)
            .with_endpoint(server.uri())
            .with_retry(RetryConfig::none())
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

fn bag(value: serde_json::Value) -> ParameterBag {
    serde_json::from_value(value).unwrap()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyProfile {
    symbol: String,
    company_name: String,
    ipo_date: String,
}

#[tokio::test]
async fn test_every_operation_reaches_its_endpoint_once() {
    let server = MockServer::start().await;
    for op in OperationId::ALL {
        Mock::given(method("GET"))
            .and(path(op.path()))
            .and(query_param("apikey", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_string(op.operation_id()))
            .expect(1)
            .named(op.operation_id())
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let ctx = CallContext::background();
    for op in OperationId::ALL {
        let response = client
            .dispatch(&ctx, op.path(), &ParameterBag::new())
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text(), op.operation_id());
    }
}

#[tokio::test]
async fn test_profile_by_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "ipoDate": "1980-12-12",
            "price": 232.8
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .dispatch(
            &CallContext::background(),
            "/profile",
            &bag(json!({"symbol": "AAPL"})),
        )
        .await
        .unwrap();

    assert!(response.is_success());
    let profiles: Vec<CompanyProfile> = response.json().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].symbol, "AAPL");
    assert_eq!(profiles[0].company_name, "Apple Inc.");
    assert!(profiles[0].ipo_date.contains("1980"));

    // The body can be read again.
    let mut raw = String::new();
    std::io::Read::read_to_string(&mut response.reader(), &mut raw).unwrap();
    assert!(raw.contains("Apple Inc."));
}

#[tokio::test]
async fn test_typed_call_and_dispatch_send_the_same_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/balance-sheet-statement"))
        .and(query_param("symbol", "SAI.MC"))
        .and(query_param("period", "FY"))
        .and(query_param("limit", "1"))
        .and(query_param("apikey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let ctx = CallContext::background();

    client
        .dispatch(
            &ctx,
            "/balance-sheet-statement",
            &bag(json!({"symbol": "SAI.MC", "period": "FY", "limit": 1})),
        )
        .await
        .unwrap();

    let typed = fmp_lib::operations::StatementParams {
        symbol: "SAI.MC".into(),
        limit: Some(1),
        period: Some(fmp_lib::operations::Period::FiscalYear),
    };
    client.balance_sheet_statement(&ctx, &typed).await.unwrap();
}

#[tokio::test]
async fn test_unknown_fields_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .dispatch(
            &CallContext::background(),
            "/quote",
            &bag(json!({"symbol": "MSFT", "colour": "blue"})),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("symbol=MSFT"));
    assert!(!query.contains("colour"));
}

#[tokio::test]
async fn test_out_of_range_count_is_sent_to_server() {
    let server = MockServer::start().await;
    Mock::given(path("/search-symbol"))
        .and(query_param("limit", "-1"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .dispatch(
            &CallContext::background(),
            "/search-symbol",
            &bag(json!({"query": "AAPL", "limit": -1})),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_unknown_operation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .dispatch(&CallContext::background(), "unknown.operation", &ParameterBag::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::UnknownOperation { ref operation } if operation == "unknown.operation"));
    assert!(err.to_string().contains("unknown.operation"));
}

#[tokio::test]
async fn test_mistyped_parameter_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .dispatch(
            &CallContext::background(),
            "/income-statement",
            &bag(json!({"symbol": "AAPL", "limit": "two"})),
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(ValidationError::Decode { operation, .. }) => {
            assert_eq!(operation, "/income-statement");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = CallContext::background();
    ctx.cancel();
    let err = client(&server)
        .profile(&ctx, &SymbolParams::new("AAPL"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Client(ClientError::Cancelled)));
    assert!(err.is_cancellation());
}

#[tokio::test]
async fn test_error_statuses_are_responses() {
    let server = MockServer::start().await;
    Mock::given(path("/quote"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"Error Message": "Invalid API KEY."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .dispatch(
            &CallContext::background(),
            "/quote",
            &bag(json!({"symbol": "AAPL"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert!(!response.is_success());
    assert!(response.text().contains("Invalid API KEY"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_shares_one_client() {
    let server = MockServer::start().await;
    Mock::given(path("/quote-short"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(16)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let client = client.clone();
        tasks.spawn(async move {
            client
                .dispatch(
                    &CallContext::background(),
                    "/quote-short",
                    &bag(json!({"symbol": format!("SYM{i}")})),
                )
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        assert!(result.unwrap().unwrap().is_success());
    }
}
