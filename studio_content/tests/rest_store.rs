//! Integration tests for the REST store against a local HTTP server.
//!
//! Checks request building (document paths, the `key`, `pageSize` and
//! `pageToken` query parameters) and how real responses are classified.
use std::net::TcpListener;

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use studio_content::store::{DocumentStore, fetch_collection};
use studio_content::{ContentError, RestStore, StoreConfig};
use test_helpers::wire;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key-5f1c";
const ROOT: &str = "/v1/projects/homepage/databases/(default)/documents";

/// A mock HTTP server and the runtime it was started on.
struct Server {
    server: MockServer,
    runtime: Runtime,
}

impl Server {
    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn store(&self, page_size: u32) -> Result<RestStore> {
        let mut config = StoreConfig::new("homepage");
        config.base_url = format!("{}/v1", self.server.uri());
        config.api_key = Some(API_KEY.to_owned());
        config.page_size = page_size;
        RestStore::new(&config).map_err(|err| anyhow!("{err}"))
    }
}

#[fixture]
fn server() -> Server {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("runtime builds");
    let server = runtime.block_on(MockServer::start());
    Server { server, runtime }
}

fn stored(id: &str, title: &str) -> serde_json::Value {
    wire::document_json(
        &format!("projects/homepage/databases/(default)/documents/content/{id}"),
        [("title", wire::string(title))],
    )
}

#[rstest]
fn fetches_documents_with_the_api_key(server: Server) -> Result<()> {
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("{ROOT}/content/heroContent")))
            .and(query_param("key", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(stored("heroContent", "Hi")))
            .expect(1),
    );

    let doc = server
        .store(100)?
        .fetch_document("content/heroContent")
        .map_err(|err| anyhow!("{err}"))?
        .ok_or_else(|| anyhow!("document should be present"))?;
    ensure!(doc.id() == "heroContent", "id: {}", doc.id());
    Ok(())
}

#[rstest]
fn not_found_response_is_absence(server: Server) -> Result<()> {
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("{ROOT}/content/faqContent")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "Document not found", "status": "NOT_FOUND"}
            })))
            .expect(1),
    );

    let outcome = server
        .store(100)?
        .fetch_document("content/faqContent")
        .map_err(|err| anyhow!("{err}"))?;
    ensure!(outcome.is_none(), "expected None, got {outcome:?}");
    Ok(())
}

#[rstest]
fn forbidden_response_is_a_transport_error(server: Server) -> Result<()> {
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("{ROOT}/content/heroContent")))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Missing or insufficient permissions."}
            }))),
    );

    let err = server
        .store(100)?
        .fetch_document("content/heroContent")
        .err()
        .ok_or_else(|| anyhow!("expected an error"))?;
    match &*err {
        ContentError::Transport {
            url,
            status,
            message,
        } => {
            ensure!(*status == 403, "status: {status}");
            ensure!(message == "Missing or insufficient permissions.", "message: {message}");
            ensure!(!url.contains(API_KEY), "url carries the key: {url}");
        }
        other => return Err(anyhow!("expected Transport, got {other:?}")),
    }
    Ok(())
}

#[rstest]
fn listing_sends_page_size_and_follows_tokens(server: Server) -> Result<()> {
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("{ROOT}/content")))
            .and(query_param("key", API_KEY))
            .and(query_param("pageSize", "2"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [stored("heroContent", "Hi"), stored("faqContent", "FAQ")],
                "nextPageToken": "tok-2",
            })))
            .expect(1),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path(format!("{ROOT}/content")))
            .and(query_param("key", API_KEY))
            .and(query_param("pageSize", "2"))
            .and(query_param("pageToken", "tok-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [stored("footerContent", "Bye")],
            })))
            .expect(1),
    );

    let store = server.store(2)?;
    let collection = fetch_collection(&store, "content").map_err(|err| anyhow!("{err}"))?;
    let ids: Vec<&str> = collection.documents.iter().map(|doc| doc.id()).collect();
    ensure!(
        ids == ["heroContent", "faqContent", "footerContent"],
        "ids: {ids:?}"
    );
    Ok(())
}

#[test]
fn connection_failures_do_not_reveal_the_api_key() -> Result<()> {
    let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
    let mut config = StoreConfig::new("homepage");
    config.base_url = format!("http://127.0.0.1:{port}/v1");
    config.api_key = Some(API_KEY.to_owned());
    let store = RestStore::new(&config).map_err(|err| anyhow!("{err}"))?;

    let err = store
        .fetch_document("content/heroContent")
        .err()
        .ok_or_else(|| anyhow!("nothing listens on port {port}"))?;
    ensure!(matches!(&*err, ContentError::Http(_)), "unexpected error: {err}");

    let mut rendered = format!("{err} {err:?}");
    let mut source = std::error::Error::source(&*err);
    while let Some(inner) = source {
        rendered.push_str(&format!(" {inner}"));
        source = inner.source();
    }
    ensure!(!rendered.contains(API_KEY), "error reveals the key: {rendered}");
    Ok(())
}
