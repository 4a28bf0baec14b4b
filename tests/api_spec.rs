use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use futures::stream::{self, StreamExt};
use serde_json::json;

use askyourstack::api::{create_router, frames, AppState, RelayRequest, SecurityConfig};
use askyourstack::models::*;
use askyourstack::provider::{AnswerStream, AskProvider, ProviderError};

/// In-memory provider that replays canned messages and records every call.
#[derive(Default)]
struct FakeProvider {
    messages: Vec<ProviderMessage>,
    fail_after_messages: bool,
    records: Vec<DocRecord>,
    count: Option<u64>,
    asks: Mutex<Vec<(String, String, ProviderOptions)>>,
    record_lookups: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl AskProvider for FakeProvider {
    async fn ask(
        &self,
        table: &str,
        question: &str,
        options: &ProviderOptions,
    ) -> Result<AnswerStream, ProviderError> {
        self.asks
            .lock()
            .unwrap()
            .push((table.to_string(), question.to_string(), options.clone()));

        let mut items: Vec<Result<ProviderMessage, ProviderError>> =
            self.messages.iter().cloned().map(Ok).collect();
        if self.fail_after_messages {
            items.push(Err(ProviderError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "upstream went away".into(),
            }));
        }
        Ok(stream::iter(items).boxed())
    }

    async fn get_records(
        &self,
        _table: &str,
        ids: &[String],
    ) -> Result<Vec<DocRecord>, ProviderError> {
        self.record_lookups.lock().unwrap().push(ids.to_vec());
        Ok(self
            .records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn count_records(&self, _table: &str) -> Result<u64, ProviderError> {
        self.count.ok_or(ProviderError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "no count".into(),
        })
    }
}

fn answer_script() -> Vec<ProviderMessage> {
    vec![
        AnswerMessage::answer("Use ", false),
        AnswerMessage::answer("the app ", false),
        AnswerMessage::answer("router.", true),
        AnswerMessage::references(["rec_1", "rec_2"]),
    ]
    .into_iter()
    .map(ProviderMessage::from)
    .collect()
}

fn sample_records() -> Vec<DocRecord> {
    vec![
        DocRecord {
            id: "rec_1".into(),
            title: "Routing".into(),
            url: "https://nextjs.org/docs/routing".into(),
            website: "nextjs-docs".into(),
        },
        DocRecord {
            id: "rec_2".into(),
            title: "Hooks".into(),
            url: "https://react.dev/reference/react".into(),
            website: "reactjs-docs".into(),
        },
    ]
}

fn setup_with(provider: FakeProvider, security: SecurityConfig) -> (TestServer, Arc<FakeProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::new().with_provider("askyourstack", provider.clone());
    let server = TestServer::new(create_router(state, security)).expect("Failed to create test server");
    (server, provider)
}

fn setup(provider: FakeProvider) -> (TestServer, Arc<FakeProvider>) {
    setup_with(provider, SecurityConfig::disabled())
}

fn ask_body() -> serde_json::Value {
    json!({
        "question": "How do I add a page?",
        "checkedDocs": ["reactjs-docs", "nextjs-docs"],
        "personality": "pirate"
    })
}

mod ask {
    use super::*;

    #[tokio::test]
    async fn streams_every_provider_message_as_a_frame() {
        let (server, _) = setup(FakeProvider {
            messages: answer_script(),
            ..Default::default()
        });

        let response = server.post("/api/ask").json(&ask_body()).await;

        response.assert_status_ok();
        let expected: String = answer_script()
            .iter()
            .map(|m| format!("event: message\ndata: {}\n\n", m.payload()))
            .collect();
        assert_eq!(response.text(), expected);
    }

    #[tokio::test]
    async fn sets_event_stream_headers() {
        let (server, _) = setup(FakeProvider {
            messages: answer_script(),
            ..Default::default()
        });

        let response = server.post("/api/ask").json(&ask_body()).await;

        assert_eq!(
            response.header("content-type"),
            "text/event-stream;charset=utf-8"
        );
        assert_eq!(response.header("cache-control"), "no-cache, no-transform");
        assert_eq!(response.header("connection"), "keep-alive");
    }

    #[tokio::test]
    async fn passes_assembled_options_to_the_provider() {
        let (server, provider) = setup(FakeProvider {
            messages: answer_script(),
            ..Default::default()
        });

        server.post("/api/ask").json(&ask_body()).await.assert_status_ok();

        let asks = provider.asks.lock().unwrap();
        assert_eq!(asks.len(), 1);
        let (table, question, options) = &asks[0];
        assert_eq!(table, "content");
        assert_eq!(question, "How do I add a page?");
        assert_eq!(
            options.rules[2],
            "You are helping a developer that is using the following stack: Next.js, React"
        );
        assert_eq!(options.rules[3], "Answer in the voice of a pirate.");
        let filter = options.search.filter.as_ref().expect("filter");
        assert_eq!(filter.website.any, vec!["reactjs-docs", "nextjs-docs"]);
    }

    #[tokio::test]
    async fn accepts_checked_settings_variant() {
        let (server, provider) = setup(FakeProvider::default());

        server
            .post("/api/ask")
            .json(&json!({
                "database": "askyourstack",
                "question": "What is a view?",
                "checkedDocs": [],
                "checkedSettings": ["eli5", "glados"]
            }))
            .await
            .assert_status_ok();

        let asks = provider.asks.lock().unwrap();
        let options = &asks[0].2;
        assert_eq!(options.rules.len(), 4);
        assert!(options.rules[2].starts_with("Answer with a GLaDOS personality."));
        assert_eq!(options.rules[3], "Answer as you would to a 5 year old.");
        assert!(options.search.filter.is_none());
    }

    #[tokio::test]
    async fn frames_messages_after_references() {
        let (server, _) = setup(FakeProvider {
            messages: vec![
                AnswerMessage::references(["r1"]).into(),
                AnswerMessage::answer("body", true).into(),
            ],
            ..Default::default()
        });

        let text = server.post("/api/ask").json(&ask_body()).await.text();

        assert_eq!(
            text,
            concat!(
                "event: message\ndata: {\"records\":[\"r1\"]}\n\n",
                "event: message\ndata: {\"answer\":\"body\",\"done\":true}\n\n",
            )
        );
    }

    #[tokio::test]
    async fn forwards_payloads_byte_for_byte() {
        let raw = [
            r#"{"answer":"a","done":false,"sessionId":"s1"}"#,
            r#"{"records":["r1"],"done":true}"#,
        ];
        let (server, _) = setup(FakeProvider {
            messages: raw.iter().map(|r| ProviderMessage::parse(r).unwrap()).collect(),
            ..Default::default()
        });

        let text = server.post("/api/ask").json(&ask_body()).await.text();

        let expected: String = raw
            .iter()
            .map(|r| format!("event: message\ndata: {}\n\n", r))
            .collect();
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn rejects_get_with_method_not_allowed() {
        let (server, provider) = setup(FakeProvider::default());

        let response = server.get("/api/ask").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&json!({ "message": "Method not allowed" }));
        assert!(provider.asks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_object() {
        let (server, provider) = setup(FakeProvider::default());

        let response = server.post("/api/ask").json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid body" }));
        assert!(provider.asks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_non_json_body() {
        let (server, _) = setup(FakeProvider::default());

        let response = server.post("/api/ask").text("question=hi").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid body" }));
    }

    #[tokio::test]
    async fn rejects_mistyped_fields() {
        let (server, _) = setup(FakeProvider::default());

        let response = server
            .post("/api/ask")
            .json(&json!({
                "question": "q",
                "checkedDocs": "nextjs-docs",
                "personality": "pirate"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_unknown_database() {
        let (server, provider) = setup(FakeProvider::default());

        let mut body = ask_body();
        body["database"] = json!("elsewhere");
        let response = server.post("/api/ask").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid database" }));
        assert!(provider.asks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_two_personalities() {
        let (server, _) = setup(FakeProvider::default());

        let response = server
            .post("/api/ask")
            .json(&json!({
                "question": "q",
                "checkedDocs": [],
                "checkedSettings": ["yoda"],
                "personality": "pirate"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Conflicting settings" }));
    }

    #[tokio::test]
    async fn unknown_settings_are_ignored() {
        let (server, provider) = setup(FakeProvider::default());

        server
            .post("/api/ask")
            .json(&json!({
                "question": "q",
                "checkedDocs": [],
                "checkedSettings": ["sea-shanty"]
            }))
            .await
            .assert_status_ok();

        assert_eq!(provider.asks.lock().unwrap()[0].2.rules.len(), 2);
    }
}

mod relay_stream {
    use super::*;

    fn request() -> RelayRequest {
        RelayRequest {
            id: uuid::Uuid::new_v4(),
            table: "content",
            question: "q".into(),
            options: askyourstack::prompt::assemble(&["nextjs-docs"], &["default"]),
        }
    }

    #[tokio::test]
    async fn does_not_contact_provider_until_polled() {
        let provider = Arc::new(FakeProvider::default());
        let stream = frames(provider.clone(), request());

        assert!(provider.asks.lock().unwrap().is_empty());
        let items: Vec<_> = stream.collect().await;
        assert!(items.is_empty());
        assert_eq!(provider.asks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_ends_stream_with_error() {
        let provider = Arc::new(FakeProvider {
            messages: vec![AnswerMessage::answer("partial", false).into()],
            fail_after_messages: true,
            ..Default::default()
        });

        let items: Vec<_> = frames(provider, request()).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].as_ref().unwrap(),
            "event: message\ndata: {\"answer\":\"partial\",\"done\":false}\n\n"
        );
        assert!(items[1].is_err());
    }
}

mod docs_get {
    use super::*;

    #[tokio::test]
    async fn returns_empty_array_without_calling_provider() {
        let (server, provider) = setup(FakeProvider::default());

        let response = server.post("/api/docs-get").json(&json!({ "ids": [] })).await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
        assert!(provider.record_lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_matching_records() {
        let (server, provider) = setup(FakeProvider {
            records: sample_records(),
            ..Default::default()
        });

        let response = server
            .post("/api/docs-get")
            .json(&json!({ "ids": ["rec_2"], "database": "askyourstack" }))
            .await;

        response.assert_status_ok();
        let records: Vec<DocRecord> = response.json();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Hooks");
        assert_eq!(provider.record_lookups.lock().unwrap()[0], vec!["rec_2"]);
    }

    #[tokio::test]
    async fn rejects_missing_ids() {
        let (server, _) = setup(FakeProvider::default());

        let response = server.post("/api/docs-get").json(&json!({ "database": "askyourstack" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid body" }));
    }

    #[tokio::test]
    async fn rejects_unknown_database() {
        let (server, _) = setup(FakeProvider::default());

        let response = server
            .post("/api/docs-get")
            .json(&json!({ "ids": ["rec_1"], "database": "nope" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid database" }));
    }

    #[tokio::test]
    async fn rejects_put() {
        let (server, _) = setup(FakeProvider::default());

        let response = server.put("/api/docs-get").json(&json!({ "ids": [] })).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&json!({ "message": "Method not allowed" }));
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn lists_databases_with_record_counts() {
        let (server, _) = setup(FakeProvider {
            count: Some(1234),
            ..Default::default()
        });

        let response = server.get("/api/catalog").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["databases"][0]["id"], "askyourstack");
        assert_eq!(body["databases"][0]["recordCount"], 1234);
        assert_eq!(body["docSections"][0]["docs"][0]["id"], "nextjs-docs");
        assert_eq!(body["directives"][0]["id"], "default");
    }

    #[tokio::test]
    async fn omits_count_when_provider_fails() {
        let (server, _) = setup(FakeProvider::default());

        let body: serde_json::Value = server.get("/api/catalog").await.json();

        assert!(body["databases"][0].get("recordCount").is_none());
        assert!(body["databases"][0].get("url").is_none());
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (server, _) = setup(FakeProvider::default());

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}

mod rate_limit {
    use super::*;

    #[tokio::test]
    async fn rejects_requests_over_the_limit() {
        let (server, _) = setup_with(FakeProvider::default(), SecurityConfig::with_rate_limit(1));

        server.get("/api/health").await.assert_status_ok();
        let response = server.get("/api/health").await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        response.assert_json(&json!({ "message": "Too many requests" }));
    }
}
