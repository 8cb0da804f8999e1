//! Testes de integração do pipeline contra servidores HTTP simulados.

use repolens::types::config::Config;
use repolens::pipeline::Pipeline;
use repolens::Outcome;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo_json(server: &MockServer, name: &str, description: Option<&str>, language: Option<&str>) -> serde_json::Value {
    json!({
        "name": name,
        "full_name": format!("alice/{}", name),
        "description": description,
        "language": language,
        "contents_url": format!("{}/repos/alice/{}/contents/{{+path}}", server.uri(), name),
        "fork": false
    })
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-test",
        "object": "text_completion",
        "choices": [{"text": text, "index": 0, "finish_reason": "stop"}]
    }))
}

/// Pipeline apontando para os dois servidores simulados, sem pausa.
fn pipeline(forge: &MockServer, completion: &MockServer) -> Pipeline {
    let mut config = Config::default();
    config.forge.api_base = forge.uri();
    config.completion.api_base = format!("{}/v1", completion.uri());
    config.general.timeout_secs = 5;
    config.pipeline.pause_ms = 0;

    Pipeline::from_config(&config, SecretString::new("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn test_alice_best_repository() {
    let forge = MockServer::start().await;
    let llm = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(&forge, "repoA", Some("x"), Some("Python")),
            repo_json(&forge, "repoB", None, Some("Python")),
        ])))
        .expect(1)
        .mount(&forge)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/repoA/contents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "file", "name": "a.py", "download_url": format!("{}/raw/a.py", forge.uri())},
            {"type": "file", "name": "notes.txt", "download_url": format!("{}/raw/notes.txt", forge.uri())},
            {"type": "dir", "name": "pkg", "download_url": null}
        ])))
        .expect(1)
        .mount(&forge)
        .await;

    Mock::given(method("GET"))
        .and(path("/raw/a.py"))
        .respond_with(ResponseTemplate::new(200).set_body_string("print(1)"))
        .expect(1)
        .mount(&forge)
        .await;

    // repoB nunca deve ter o conteúdo listado
    Mock::given(method("GET"))
        .and(path("/repos/alice/repoB/contents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&forge)
        .await;

    Mock::given(method("GET"))
        .and(path("/raw/notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("notes"))
        .expect(0)
        .mount(&forge)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains("This is the repository: repoA"))
        .and(body_string_contains("cHJpbnQoMSk="))
        .respond_with(completion("Complexidade moderada"))
        .expect(1)
        .mount(&llm)
        .await;

    let mut pipeline = pipeline(&forge, &llm);
    let report = pipeline.run("https://github.com/alice").await;

    assert_eq!(report.repositories_found, Some(2));
    match &report.outcome {
        Outcome::Best(best) => {
            assert_eq!(best.repository.name, "repoA");
            assert_eq!(best.assessment, "Complexidade moderada");
            assert_eq!(best.score, "Complexidade moderada".chars().count());
        }
        Outcome::NotFound => panic!("esperava um repositório"),
    }
    assert_eq!(report.link.as_deref(), Some("https://github.com/alice/repoA"));
}

#[tokio::test]
async fn test_repository_listing_404_is_not_found() {
    let forge = MockServer::start().await;
    let llm = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&forge)
        .await;

    Mock::given(method("POST"))
        .respond_with(completion("nunca"))
        .expect(0)
        .mount(&llm)
        .await;

    let mut pipeline = pipeline(&forge, &llm);
    let report = pipeline.run("ghost").await;

    assert!(report.outcome.is_not_found());
    assert!(report.repositories_found.is_none());
}

#[tokio::test]
async fn test_content_listing_500_skips_repository() {
    let forge = MockServer::start().await;
    let llm = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(&forge, "broken", Some("x"), Some("C++")),
        ])))
        .mount(&forge)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/broken/contents/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&forge)
        .await;

    Mock::given(method("POST"))
        .respond_with(completion("nunca"))
        .expect(0)
        .mount(&llm)
        .await;

    let mut pipeline = pipeline(&forge, &llm);
    let report = pipeline.run("alice").await;

    assert!(report.outcome.is_not_found());
    assert_eq!(report.repositories_found, Some(1));
    assert_eq!(report.stats.skipped_contents, 1);
}

#[tokio::test]
async fn test_identical_prompts_hit_cache() {
    let forge = MockServer::start().await;
    let llm = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(&forge, "same", Some("x"), Some("Python")),
        ])))
        .expect(2)
        .mount(&forge)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/alice/same/contents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&forge)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(completion("Simples"))
        .expect(1)
        .mount(&llm)
        .await;

    let mut pipeline = pipeline(&forge, &llm);

    let first = pipeline.run("alice").await;
    let second = pipeline.run("alice").await;

    assert_eq!(
        first.outcome.best().unwrap().assessment,
        second.outcome.best().unwrap().assessment
    );
    assert_eq!(first.stats.cache_hits, 0);
    assert_eq!(second.stats.cache_hits, 1);
    assert_eq!(second.stats.scored, 1);
    assert_eq!(pipeline.evaluator().cache_stats().hits, 1);
}

#[tokio::test]
async fn test_completion_failure_skips_repository() {
    let forge = MockServer::start().await;
    let llm = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(&forge, "quota", Some("x"), Some("Python")),
            repo_json(&forge, "fine", Some("y"), Some("R")),
        ])))
        .mount(&forge)
        .await;

    for name in ["quota", "fine"] {
        Mock::given(method("GET"))
            .and(path(format!("/repos/alice/{}/contents/", name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&forge)
            .await;
    }

    Mock::given(method("POST"))
        .and(body_string_contains("This is the repository: quota"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "quota"}})))
        .mount(&llm)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("This is the repository: fine"))
        .respond_with(completion("Ok"))
        .mount(&llm)
        .await;

    let mut pipeline = pipeline(&forge, &llm);
    let report = pipeline.run("alice").await;

    assert_eq!(report.stats.evaluation_failures, 1);
    assert_eq!(report.outcome.best().unwrap().repository.name, "fine");
}
