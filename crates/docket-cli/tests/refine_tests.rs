//! End-to-end tests of the refine command against a mock Ollama server

use docket_cli::cli::RefineArgs;
use docket_cli::commands::execute_refine;
use docket_cli::config::{Config, OutputFormat, ProviderKind};
use docket_cli::{CliError, Formatter};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_pair(dir: &Path, name: &str, question: &str, answer: &str) {
    let body = json!({
        "dataSet": {
            "question": { "raw": { "text": question } },
            "answer": { "raw": { "text": answer } }
        }
    });
    fs::write(dir.join(name), serde_json::to_vec(&body).unwrap()).unwrap();
}

fn ollama_config(endpoint: String, input_dir: &Path, output: &Path) -> Config {
    let mut config = Config::default();
    config.provider.kind = ProviderKind::Ollama;
    config.provider.endpoint = Some(endpoint);
    config.provider.model = "llama3".to_string();
    config.run.input_dir = input_dir.to_path_buf();
    config.run.output = output.to_path_buf();
    config
}

#[tokio::test]
async fn test_refine_writes_output_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "```json\n{\"question_intent\": \"Expertise\"}\n```"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let input = tempdir().unwrap();
    write_pair(input.path(), "a.json", "Explain ownership.", "Each value has one owner.");
    write_pair(input.path(), "b.json", "Why Rust?", "Memory safety.");
    fs::write(input.path().join("c.json"), "not json").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("refined.json");
    let config = ollama_config(server.uri(), input.path(), &output);
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    execute_refine(RefineArgs::default(), &config, &formatter)
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {
                "question": "Explain ownership.",
                "answer": "Each value has one owner.",
                "categorized_intents": { "question_intent": "Expertise" }
            },
            {
                "question": "Why Rust?",
                "answer": "Memory safety.",
                "categorized_intents": { "question_intent": "Expertise" }
            }
        ])
    );
}

#[tokio::test]
async fn test_refine_max_items_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "plain text" })))
        .expect(1)
        .mount(&server)
        .await;

    let input = tempdir().unwrap();
    for i in 0..4 {
        write_pair(input.path(), &format!("{}.json", i), "Q", "A");
    }

    let out = tempdir().unwrap();
    let output = out.path().join("refined.json");
    let config = ollama_config(server.uri(), input.path(), &output);
    let args = RefineArgs {
        max_items: Some(1),
        ..RefineArgs::default()
    };

    execute_refine(args, &config, &Formatter::new(OutputFormat::Json, false))
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written[0]["categorized_intents"],
        json!({ "error": "Failed to parse API response", "raw_response": "plain text" })
    );
    assert_eq!(written.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_refine_missing_input_dir() {
    let out = tempdir().unwrap();
    let output = out.path().join("refined.json");
    let config = ollama_config(
        "http://localhost:11434".to_string(),
        &out.path().join("does-not-exist"),
        &output,
    );

    let result = execute_refine(
        RefineArgs::default(),
        &config,
        &Formatter::new(OutputFormat::Quiet, false),
    )
    .await;

    assert!(matches!(result, Err(CliError::Refiner(_))));
    assert!(!output.exists());
}
