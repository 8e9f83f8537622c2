//! Google Drive v3 implementation of the hierarchy client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};
use witness_common::{ContainerRef, Error, Result};

use crate::credentials::{ServiceAccountKey, TokenSource};
use crate::hierarchy::{
    ChildQuery, EntryKind, HierarchyClient, HierarchyConnector, FOLDER_MIME_TYPE,
    IMAGE_MIME_PREFIX,
};

/// Public Drive API base URL
pub const DEFAULT_DRIVE_API_URL: &str = "https://www.googleapis.com";

/// Upper bound Drive accepts for `pageSize`; only the first page is read
const PAGE_SIZE: &str = "1000";

/// Opens per-request Drive sessions using a service account
pub struct DriveConnector {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenSource,
}

impl DriveConnector {
    /// Create a new connector
    pub fn new(base_url: String, key: ServiceAccountKey) -> Result<Self> {
        let tokens = TokenSource::new(key)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
        })
    }

    pub fn service_account(&self) -> &str {
        self.tokens.client_email()
    }
}

#[async_trait]
impl HierarchyConnector for DriveConnector {
    async fn connect(&self) -> Result<Box<dyn HierarchyClient>> {
        let access_token = self.tokens.fetch_token(&self.http).await?;

        Ok(Box::new(DriveClient {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            access_token,
        }))
    }
}

/// An authenticated Drive session
pub struct DriveClient {
    base_url: String,
    http: reqwest::Client,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<ContainerRef>,
}

#[cfg(test)]
impl DriveClient {
    /// Create a session from an already issued access token
    fn with_token(base_url: String, access_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            access_token,
        }
    }
}

/// Escape a value for use inside a single-quoted Drive query literal
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Translate a [`ChildQuery`] into a Drive `q` expression
pub fn build_search_query(query: &ChildQuery) -> String {
    let mut q = format!(
        "'{}' in parents and trashed = false",
        escape_literal(&query.parent_id)
    );

    if let Some(name) = &query.name {
        q.push_str(&format!(" and name = '{}'", escape_literal(name)));
    }

    match query.kind {
        Some(EntryKind::Folder) => {
            q.push_str(&format!(" and mimeType = '{}'", FOLDER_MIME_TYPE));
        }
        Some(EntryKind::Image) => {
            q.push_str(&format!(" and mimeType contains '{}'", IMAGE_MIME_PREFIX));
        }
        None => {}
    }

    q
}

#[async_trait]
impl HierarchyClient for DriveClient {
    async fn list_children(&self, query: &ChildQuery) -> Result<Vec<ContainerRef>> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let q = build_search_query(query);

        debug!("Listing Drive children: {}", q);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", q.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", PAGE_SIZE),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Drive listing failed with {}: {}", status, body);
            return Err(Error::Provider { status, body });
        }

        let list: FileList = response.json().await?;
        debug!("Drive returned {} entries", list.files.len());

        Ok(list.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY_PEM: &str = include_str!("../tests/fixtures/test_service_account_key.pem");

    #[test]
    fn test_query_for_all_children() {
        let q = build_search_query(&ChildQuery::children_of("root"));
        assert_eq!(q, "'root' in parents and trashed = false");
    }

    #[test]
    fn test_query_for_named_folder() {
        let q = build_search_query(
            &ChildQuery::children_of("abc123")
                .named("bridge")
                .of_kind(EntryKind::Folder),
        );
        assert_eq!(
            q,
            "'abc123' in parents and trashed = false and name = 'bridge' \
             and mimeType = 'application/vnd.google-apps.folder'"
        );
    }

    #[test]
    fn test_query_for_images() {
        let q = build_search_query(&ChildQuery::children_of("day").of_kind(EntryKind::Image));
        assert!(q.ends_with("and mimeType contains 'image/'"));
    }

    #[test]
    fn test_query_escapes_quotes() {
        let q = build_search_query(&ChildQuery::children_of("root").named("o'hare \\ north"));
        assert!(q.contains("name = 'o\\'hare \\\\ north'"));
    }

    #[test]
    fn test_file_list_parses_missing_files_as_empty() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());

        let list: FileList =
            serde_json::from_str(r#"{"files":[{"id":"1","name":"2026-02-01"}]}"#).unwrap();
        assert_eq!(list.files, vec![ContainerRef::new("1", "2026-02-01")]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DriveClient::with_token("http://localhost:9000/".to_string(), "t".to_string());
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_list_children_sends_drive_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer ya29.session"))
            .and(query_param(
                "q",
                "'p1' in parents and trashed = false \
                 and mimeType = 'application/vnd.google-apps.folder'",
            ))
            .and(query_param("fields", "files(id,name)"))
            .and(query_param("pageSize", "1000"))
            .and(query_param("supportsAllDrives", "true"))
            .and(query_param("includeItemsFromAllDrives", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": [
                    { "id": "d2", "name": "2026-02-14" },
                    { "id": "d1", "name": "2026-02-01" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DriveClient::with_token(server.uri(), "ya29.session".to_string());
        let folders = client
            .list_children(&ChildQuery::children_of("p1").of_kind(EntryKind::Folder))
            .await
            .unwrap();

        // Provider order is preserved
        assert_eq!(
            folders,
            vec![
                ContainerRef::new("d2", "2026-02-14"),
                ContainerRef::new("d1", "2026-02-01"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_children_non_success_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(403).set_body_string("insufficientPermissions"))
            .mount(&server)
            .await;

        let client = DriveClient::with_token(server.uri(), "ya29.session".to_string());
        let err = client
            .list_children(&ChildQuery::children_of("root"))
            .await
            .unwrap_err();

        match err {
            Error::Provider { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "insufficientPermissions");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connector_authenticates_then_lists() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.minted",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer ya29.minted"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "files": [{ "id": "p1", "name": "bridge" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let key = ServiceAccountKey::from_json(
            &json!({
                "client_email": "witness@example.iam.gserviceaccount.com",
                "private_key": TEST_KEY_PEM,
                "token_uri": format!("{}/token", server.uri()),
            })
            .to_string(),
        )
        .unwrap();

        let connector = DriveConnector::new(format!("{}/", server.uri()), key).unwrap();
        let session = connector.connect().await.unwrap();
        let projects = session
            .list_children(&ChildQuery::children_of("root").named("bridge"))
            .await
            .unwrap();

        assert_eq!(projects, vec![ContainerRef::new("p1", "bridge")]);
    }

    #[tokio::test]
    async fn test_connector_surfaces_token_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let key = ServiceAccountKey::from_json(
            &json!({
                "client_email": "witness@example.iam.gserviceaccount.com",
                "private_key": TEST_KEY_PEM,
                "token_uri": format!("{}/token", server.uri()),
            })
            .to_string(),
        )
        .unwrap();

        let connector = DriveConnector::new(server.uri(), key).unwrap();
        let err = connector.connect().await.err().expect("token exchange must fail");
        assert!(matches!(err, Error::Token(_)));
    }
}
