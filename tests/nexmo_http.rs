//! Integration tests for the Nexmo gateway against a local mock server.

use nexmo_sms::{Credentials, Gateway, NexmoClient, NexmoError};
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(mock_server: &MockServer) -> NexmoClient {
    NexmoClient::builder(Credentials::new("k1", "s1", "MyApp"))
        .endpoint(format!("{}/sms/json", mock_server.uri()))
        .build()
        .unwrap()
}

fn ok_body(to: &str, message_id: &str) -> serde_json::Value {
    serde_json::json!({
        "message-count": "1",
        "messages": [{
            "to": to,
            "message-id": message_id,
            "status": "0",
            "remaining-balance": "3.14159265",
            "message-price": "0.03330000",
            "network": "12345"
        }]
    })
}

#[tokio::test]
async fn test_send_posts_form_and_decodes_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms/json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "api_key=k1&api_secret=s1&from=MyApp&to=15551234567&text=hello",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("15551234567", "abc-1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let response = nexmo_sms::send(&client, "15551234567", &"hello", "")
        .await
        .unwrap();

    assert_eq!(response.message_count.as_deref(), Some("1"));
    assert_eq!(response.messages.len(), 1);
    let message = &response.messages[0];
    assert!(message.is_ok());
    assert_eq!(message.to.as_deref(), Some("15551234567"));
    assert_eq!(message.message_id.as_deref(), Some("abc-1"));
    assert_eq!(message.error_text, None);
    assert_eq!(message.remaining_balance.as_deref(), Some("3.14159265"));
    assert_eq!(message.message_price.as_deref(), Some("0.03330000"));
    assert_eq!(message.network.as_deref(), Some("12345"));
}

#[tokio::test]
async fn test_outbound_body_has_no_callback_when_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("15551234567", "abc-1")))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    client.send("15551234567", &"hello", "").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let mut params = url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect::<Vec<(String, String)>>();
    params.sort();
    assert_eq!(
        params,
        vec![
            ("api_key".to_owned(), "k1".to_owned()),
            ("api_secret".to_owned(), "s1".to_owned()),
            ("from".to_owned(), "MyApp".to_owned()),
            ("text".to_owned(), "hello".to_owned()),
            ("to".to_owned(), "15551234567".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_callback_is_form_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains(
            "callback=https%3A%2F%2Fexample.com%2Fdlr%3Fref%3D42",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("15551234567", "abc-1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    client
        .send("15551234567", &"hi there", "https://example.com/dlr?ref=42")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_provider_error_is_returned_as_data() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "message-count": "1",
        "messages": [{ "to": "15551234567", "status": "29", "error-text": "Non White-listed Destination - rejected" }]
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let response = client.send("15551234567", &"hello", "").await.unwrap();

    let failed = response.failed().collect::<Vec<_>>();
    assert_eq!(failed.len(), 1);
    assert_eq!(
        failed[0].status_code().and_then(|code| code.known_kind()),
        Some(nexmo_sms::KnownStatusCode::NonWhitelistedDestination)
    );
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let result = client.send("15551234567", &"hello", "").await;

    match result {
        Err(NexmoError::Parse { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refused_connection_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = NexmoClient::builder(Credentials::new("k1", "s1", "MyApp"))
        .endpoint(format!("http://127.0.0.1:{port}/sms/json"))
        .build()
        .unwrap();

    let result = client.send("15551234567", &"hello", "").await;
    assert!(matches!(result, Err(NexmoError::Transport(_))));
}

#[tokio::test]
async fn test_concurrent_sends_do_not_share_request_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("to=111&text=first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("111", "id-1")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("to=222&text=second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("222", "id-2")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let other = client.clone();

    let first = tokio::spawn(async move { client.send("111", &"first", "").await });
    let second = tokio::spawn(async move { other.send("222", &"second", "").await });

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert_eq!(first.messages[0].to.as_deref(), Some("111"));
    assert_eq!(first.messages[0].message_id.as_deref(), Some("id-1"));
    assert_eq!(second.messages[0].to.as_deref(), Some("222"));
    assert_eq!(second.messages[0].message_id.as_deref(), Some("id-2"));
}
