use secrecy::SecretString;
use serde_json::json;
use signup_form::signup::response::{MSG_GENERIC, MSG_NOT_ALLOWED, MSG_UNAUTHENTICATED};
use signup_form::signup::{
    Criterion, Rejection, SignupConfig, SignupForm, SubmitOutcome, SubmitPhase,
};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.test.signature";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn form_for(url: &str) -> (SignupForm, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = SignupConfig::new(url, SecretString::from(TOKEN.to_string())).unwrap();
    let form = SignupForm::new(
        config,
        Arc::new(move |created: bool| {
            assert!(created);
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();
    (form, calls)
}

async fn mock_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn created_signals_listener_once() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_json(json!({
            "username": "alice",
            "password": "Password1234"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    assert_eq!(form.submit().await, SubmitOutcome::Created);

    let state = form.state();
    assert_eq!(state.phase(), SubmitPhase::Succeeded);
    assert!(state.criteria_errors().is_empty());
    assert_eq!(state.api_error(), "");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The listener hears about the account once per form
    assert_eq!(form.submit().await, SubmitOutcome::Created);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_username_never_reaches_the_network() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_password("Password1234");

    assert_eq!(form.submit().await, SubmitOutcome::RejectedLocally);

    let state = form.state();
    assert!(state.criteria_errors().is_empty());
    assert!(state.username_invalid());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_password_never_reaches_the_network() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (form, _) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("NoDigitsHere");

    assert_eq!(form.submit().await, SubmitOutcome::RejectedLocally);
    assert_eq!(
        form.state().visible_criteria_errors(),
        [Criterion::MissingDigit.message().to_string()]
    );
}

#[tokio::test]
async fn policy_rejection_maps_codes_and_not_allowed() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(422).set_body_json(json!({"errors": ["too_short", "not_allowed"]})),
    )
    .await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    let outcome = form.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(Rejection::Policy {
            criteria: vec![Criterion::TooShort],
            not_allowed: true,
        })
    );

    let state = form.state();
    assert_eq!(
        state.criteria_errors(),
        ["Password must be at least 10 characters long".to_string()]
    );
    assert_eq!(state.api_error(), MSG_NOT_ALLOWED);
    assert_eq!(state.phase(), SubmitPhase::ServerError);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn forbidden_sets_auth_message() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    mock_reply(&server, ResponseTemplate::new(403)).await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Rejected(Rejection::Unauthenticated)
    );

    let state = form.state();
    assert_eq!(state.api_error(), MSG_UNAUTHENTICATED);
    assert!(state.criteria_errors().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bad_request_and_server_error_are_generic() {
    if !can_bind_localhost() {
        return;
    }
    for status in [400_u16, 500, 503] {
        let server = MockServer::start().await;
        mock_reply(&server, ResponseTemplate::new(status)).await;

        let (form, _) = form_for(&format!("{}/signup", server.uri()));
        form.input_username("alice");
        form.input_password("Password1234");

        assert!(matches!(form.submit().await, SubmitOutcome::Rejected(_)));
        assert_eq!(form.state().api_error(), MSG_GENERIC, "status {status}");
    }
}

#[tokio::test]
async fn network_failure_sets_generic_message() {
    if !can_bind_localhost() {
        return;
    }
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let (form, calls) = form_for(&format!("http://127.0.0.1:{port}/signup"));
    form.input_username("alice");
    form.input_password("Password1234");

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Rejected(Rejection::Network)
    );

    let state = form.state();
    assert_eq!(state.api_error(), MSG_GENERIC);
    assert_eq!(state.phase(), SubmitPhase::NetworkError);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn resubmit_clears_previous_errors() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"errors": ["not_allowed"]})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mock_reply(&server, ResponseTemplate::new(200)).await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    assert!(matches!(form.submit().await, SubmitOutcome::Rejected(_)));
    assert_eq!(form.state().api_error(), MSG_NOT_ALLOWED);

    form.input_password("Another12345");
    assert_eq!(form.submit().await, SubmitOutcome::Created);
    assert_eq!(form.state().api_error(), "");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_submit() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({"username": "alice", "password": "Password1234"})))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"errors": ["not_allowed"]}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"username": "alice", "password": "Different1234"})))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (form, _) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    let (first, second) = tokio::join!(form.submit(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        form.input_password("Different1234");
        form.submit().await
    });

    assert_eq!(first, SubmitOutcome::Discarded);
    assert_eq!(second, SubmitOutcome::Rejected(Rejection::Unauthenticated));

    let state = form.state();
    assert_eq!(state.api_error(), MSG_UNAUTHENTICATED);
    assert!(state.criteria_errors().is_empty());
}

#[tokio::test]
async fn response_after_teardown_is_ignored() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    mock_reply(
        &server,
        ResponseTemplate::new(201).set_delay(Duration::from_millis(300)),
    )
    .await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    let (outcome, ()) = tokio::join!(form.submit(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        form.teardown();
    });

    assert_eq!(outcome, SubmitOutcome::Discarded);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(form.state().phase(), SubmitPhase::Submitting);
}

#[tokio::test]
async fn debounced_validation_shows_errors_for_last_edit() {
    let config = SignupConfig::new(
        "http://127.0.0.1:9/signup",
        SecretString::from(TOKEN.to_string()),
    )
    .unwrap()
    .with_debounce(Duration::from_millis(30));
    let form = SignupForm::new(config, Arc::new(|_: bool| {})).unwrap();

    form.input_password("alllowercase");
    form.input_password("alllowercase1");
    assert!(form.state().criteria_errors().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(
        form.state().visible_criteria_errors(),
        [Criterion::MissingUppercase.message().to_string()]
    );
}

#[tokio::test]
async fn stale_created_still_signals_but_keeps_newer_state() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({"username": "alice", "password": "Password1234"})))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"username": "alice", "password": "Different1234"})))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (form, calls) = form_for(&format!("{}/signup", server.uri()));
    form.input_username("alice");
    form.input_password("Password1234");

    let (first, second) = tokio::join!(form.submit(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        form.input_password("Different1234");
        form.submit().await
    });

    assert_eq!(first, SubmitOutcome::Created);
    assert_eq!(second, SubmitOutcome::Rejected(Rejection::Unauthenticated));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let state = form.state();
    assert_eq!(state.phase(), SubmitPhase::ServerError);
    assert_eq!(state.api_error(), MSG_UNAUTHENTICATED);
}
