mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["database"], "ok", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn auth_issues_token_for_valid_credentials() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .get(server.url("/auth"))
        .header("Username", common::USERNAME)
        .header("Password", common::PASSWORD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()), "missing token: {}", body);
    assert!(body["data"]["expires_in"].as_i64().unwrap_or(0) > 0);
    Ok(())
}

#[tokio::test]
async fn auth_rejects_bad_credentials() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let wrong_password = server
        .client
        .get(server.url("/auth"))
        .header("Username", common::USERNAME)
        .header("Password", "nope")
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let missing_headers = server.client.get(server.url("/auth")).send().await?;
    assert_eq!(missing_headers.status(), StatusCode::UNAUTHORIZED);

    let body = missing_headers.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_valid_token() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let no_token = server.client.get(server.url("/users")).send().await?;
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);

    let bad_token = server
        .client
        .get(server.url("/users/anything"))
        .header("Token", "not.a.token")
        .send()
        .await?;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);

    // Rejected before the body is even looked at
    let create = server
        .client
        .post(server.url("/users"))
        .body("{not json")
        .send()
        .await?;
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);

    let token = server.token().await?;
    let ok = server.client.get(server.url("/users")).header("Token", token).send().await?;
    assert_eq!(ok.status(), StatusCode::NOT_FOUND, "empty store has no page 1");
    Ok(())
}
