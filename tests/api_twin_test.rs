//! Integration tests for the twin API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use serde_json::json;
    use tower::util::ServiceExt;

    use dwt::twin::{GENERIC_FAILURE, Transition};

    use crate::test_utils::{
        GEMINI_PATH, body_to_json, gemini_reply, meeting_output, test_app, test_app_with_state,
    };

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn rhea() -> serde_json::Value {
        json!({
            "requester_name": "Rhea",
            "requester_email": "rhea@partner.com",
            "intent_hint": "MEETING",
            "topic": "FMCG GTM Brief Review",
            "message": "Can we meet this week to sanity-check the FMCG GTM brief?"
        })
    }

    /// Tests the state starts with nothing in flight and no output
    #[tokio::test]
    async fn it_starts_without_output() {
        let app = test_app("http://127.0.0.1:9");

        let response = app.oneshot(get("/api/twin/state")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["in_flight"], false);
        assert!(body["output"].is_null());
        assert!(body["last_error"].is_null());
    }

    /// Tests the static citation list is exposed
    #[tokio::test]
    async fn it_lists_citations() {
        let app = test_app("http://127.0.0.1:9");

        let response = app.oneshot(get("/api/twin/citations")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        let citations = body["citations"].as_array().unwrap();
        assert_eq!(citations.len(), 5);
        assert_eq!(citations[0]["title"], "FMCG Case Note.pdf");
    }

    /// Tests three candidate slots are generated in the owner's timezone
    #[tokio::test]
    async fn it_lists_candidate_slots() {
        let app = test_app("http://127.0.0.1:9");

        let response = app.oneshot(get("/api/twin/slots")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["timezone"], "Asia/Kolkata");
        let slots = body["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 3);
        assert!(slots[0]["display"].as_str().unwrap().ends_with("10:00–10:25 IST"));
        assert!(slots[2]["display"].as_str().unwrap().ends_with("11:30–11:55 IST"));
    }

    /// Tests a meeting request is dispatched once and the reply stored
    #[tokio::test]
    async fn it_processes_a_meeting_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GEMINI_PATH)
            .match_header("x-goog-api-key", "test-api-key")
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {"responseMimeType": "application/json", "temperature": 0.3}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_reply(&meeting_output().to_string()))
            .expect(1)
            .create_async()
            .await;

        let (app, state) = test_app_with_state(&server.url());

        let response = app
            .oneshot(post_json("/api/twin/requests", rhea()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["request"]["requester_name"], "Rhea");
        assert_eq!(body["request"]["owner_name"], "Pragya Khattar");
        assert_eq!(body["request"]["candidate_slots"].as_array().unwrap().len(), 3);
        assert_eq!(body["request"]["citations"].as_array().unwrap().len(), 5);
        assert_eq!(body["response"]["intent"], "MEETING");
        assert_eq!(body["response"]["agenda"]["duration_min"], 25);

        let shared = state.read().unwrap();
        assert!(!shared.view.in_flight);
        assert_eq!(shared.view.output.as_ref().unwrap().rendered_slots.len(), 3);
    }

    /// Tests blank required fields are rejected before any model call
    #[tokio::test]
    async fn it_rejects_missing_fields_without_dispatch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GEMINI_PATH)
            .expect(0)
            .create_async()
            .await;

        let (app, state) = test_app_with_state(&server.url());

        let mut form = rhea();
        form["message"] = json!("  ");
        let response = app
            .oneshot(post_json("/api/twin/requests", form))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["error"], "Missing required field: message");
        assert!(!state.read().unwrap().view.in_flight);
    }

    /// Tests an upstream error surfaces as the generic failure
    #[tokio::test]
    async fn it_reports_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GEMINI_PATH)
            .with_status(500)
            .with_body(r#"{"error": {"code": 500, "message": "internal"}}"#)
            .create_async()
            .await;

        let (app, state) = test_app_with_state(&server.url());

        let response = app
            .oneshot(post_json("/api/twin/requests", rhea()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["error"], GENERIC_FAILURE);

        let shared = state.read().unwrap();
        assert!(!shared.view.in_flight);
        assert!(shared.view.output.is_none());
        assert_eq!(shared.view.last_error.as_deref(), Some(GENERIC_FAILURE));
    }

    /// Tests a non-JSON reply is reported and clears the previous output
    #[tokio::test]
    async fn it_reports_malformed_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GEMINI_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_reply("Here is your brief: Goal: ..."))
            .create_async()
            .await;

        let (app, state) = test_app_with_state(&server.url());
        {
            let mut shared = state.write().unwrap();
            let previous = dwt::twin::parse_response(&meeting_output().to_string()).unwrap();
            shared.view = shared.view.apply(Transition::SubmitSuccess(previous));
        }

        let response = app
            .oneshot(post_json("/api/twin/requests", rhea()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let shared = state.read().unwrap();
        assert!(shared.view.output.is_none());
        assert!(shared.view.can_submit());
    }

    /// Tests an empty reply is reported as a failure
    #[tokio::test]
    async fn it_reports_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GEMINI_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let app = test_app(&server.url());

        let response = app
            .oneshot(post_json("/api/twin/requests", rhea()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    /// Tests a second submission is refused while one is in flight
    #[tokio::test]
    async fn it_rejects_submission_while_in_flight() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", GEMINI_PATH)
            .expect(0)
            .create_async()
            .await;

        let (app, state) = test_app_with_state(&server.url());
        {
            let mut shared = state.write().unwrap();
            shared.view = shared.view.apply(Transition::SubmitStart);
        }

        let response = app
            .oneshot(post_json("/api/twin/requests", rhea()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    /// Tests a client hanging up mid-call doesn't leave the twin stuck in flight
    #[tokio::test]
    async fn it_recovers_when_the_client_hangs_up() {
        // Upstream that accepts the call, stalls, then drops the connection
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    drop(socket);
                });
            }
        });

        let (app, state) = test_app_with_state(&format!("http://{}", addr));

        let dropped = tokio::time::timeout(
            Duration::from_millis(100),
            app.clone().oneshot(post_json("/api/twin/requests", rhea())),
        )
        .await;
        assert!(dropped.is_err());
        // Still dispatched, not cancelled
        assert!(state.read().unwrap().view.in_flight);

        let mut settled = false;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if !state.read().unwrap().view.in_flight {
                settled = true;
                break;
            }
        }
        assert!(settled, "submission never left the in-flight state");

        let shared = state.read().unwrap();
        assert!(shared.view.can_submit());
        assert!(shared.view.output.is_none());
        assert_eq!(shared.view.last_error.as_deref(), Some(GENERIC_FAILURE));
    }
}
