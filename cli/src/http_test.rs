use super::*;

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(1)).unwrap()
}

#[test]
fn url_joins_without_double_slash() {
    assert_eq!(client("http://127.0.0.1:3000/").url(LOGIN_PATH), "http://127.0.0.1:3000/api/auth/login");
    assert_eq!(client("http://127.0.0.1:3000").url(HEALTH_PATH), "http://127.0.0.1:3000/healthz");
}

#[test]
fn login_401_maps_to_invalid_credentials() {
    let err = auth_failure(
        StatusCode::UNAUTHORIZED,
        Some("Invalid email or password".to_owned()),
        AuthError::InvalidCredentials,
    );
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[test]
fn resolve_401_maps_to_invalid_token() {
    assert_eq!(auth_failure(StatusCode::UNAUTHORIZED, None, AuthError::InvalidToken), AuthError::InvalidToken);
}

#[test]
fn server_errors_keep_their_message() {
    let err = auth_failure(StatusCode::BAD_REQUEST, Some("missing field `email`".to_owned()), AuthError::InvalidCredentials);
    assert_eq!(err.to_string(), "missing field `email`");
}

#[tokio::test]
async fn unreachable_server_is_reported_as_unreachable() {
    // Nothing listens on the discard port.
    let auth = ApiAuth::new(client("http://127.0.0.1:9"));
    let err = auth.resolve("tok-123").await.unwrap_err();
    assert!(matches!(err, AuthError::Unreachable(_)));
}

#[tokio::test]
async fn unreachable_server_fails_data_calls() {
    let access = ApiRecords::new(client("http://127.0.0.1:9"), Some("tok".to_owned()));
    let err = access.list::<records::Lab>().await.unwrap_err();
    assert!(matches!(err, AccessError::Failed(_)));
}
