use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::StreamExt;

use scholia::application::ports::{PdfTextSource, PdfTextSourceError};
use scholia::application::services::{
    OrchestratorSettings, PDF_CONTEXT_MARKER, PromptComposer, RequestOrchestrator, clear_form,
};
use scholia::domain::{
    ChatFields, FormReset, FormState, Language, Mode, StudyPlanFields, StylePreferences, Tone,
    UploadedFile,
};
use scholia::infrastructure::llm::MockModelGateway;
use scholia::infrastructure::text_processing::MockPdfTextSource;

struct PanickingPdfSource;

#[async_trait::async_trait]
impl PdfTextSource for PanickingPdfSource {
    async fn extract(&self, _file: &UploadedFile) -> Result<String, PdfTextSourceError> {
        panic!("extract must not be called without a file");
    }
}

struct SlowPdfSource;

#[async_trait::async_trait]
impl PdfTextSource for SlowPdfSource {
    async fn extract(&self, _file: &UploadedFile) -> Result<String, PdfTextSourceError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

fn orchestrator<P: PdfTextSource + 'static>(
    gateway: Arc<MockModelGateway>,
    pdf_source: P,
    settings: OrchestratorSettings,
) -> RequestOrchestrator<MockModelGateway, P> {
    RequestOrchestrator::new(
        gateway,
        Arc::new(pdf_source),
        PromptComposer::default(),
        settings,
    )
}

fn chat_form(message: &str, language: Language) -> FormState {
    FormState {
        mode: Mode::Chat,
        chat: ChatFields::new(message),
        style: StylePreferences::new(language, Tone::Formal),
        ..Default::default()
    }
}

fn pdf_upload(text: &str) -> UploadedFile {
    UploadedFile::new(
        "notes.pdf".to_string(),
        Some("application/pdf".to_string()),
        Bytes::from(text.to_string()),
    )
}

#[tokio::test]
async fn given_working_gateway_when_handling_then_returns_full_text() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["Osmosis ", "is diffusion."]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        PanickingPdfSource,
        OrchestratorSettings::default(),
    );

    let output = orchestrator
        .handle(&chat_form("What is osmosis?", Language::English), None)
        .await;

    assert_eq!(output, "Osmosis is diffusion.");
    let request = gateway.last_request().unwrap();
    assert_eq!(request.user_message, "What is osmosis?");
}

#[tokio::test]
async fn given_pdf_upload_when_handling_then_context_reaches_gateway() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["ok"]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        MockPdfTextSource::new(),
        OrchestratorSettings::default(),
    );
    let file = pdf_upload("Chapter 1: cells");

    orchestrator
        .handle(&chat_form("Summarize", Language::English), Some(&file))
        .await;

    let request = gateway.last_request().unwrap();
    assert!(request.user_message.contains(PDF_CONTEXT_MARKER));
    assert!(request.user_message.ends_with("Chapter 1: cells"));
}

#[tokio::test]
async fn given_failing_pdf_source_when_handling_then_context_is_empty_and_request_succeeds() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["answer"]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        MockPdfTextSource::failing(),
        OrchestratorSettings::default(),
    );
    let file = pdf_upload("unreadable");

    let pdf = orchestrator.resolve_pdf_context(Some(&file)).await;
    let output = orchestrator
        .handle(&chat_form("Question", Language::English), Some(&file))
        .await;

    assert!(pdf.is_empty());
    assert_eq!(output, "answer");
    assert_eq!(gateway.last_request().unwrap().user_message, "Question");
}

#[tokio::test]
async fn given_slow_pdf_source_when_handling_then_times_out_to_empty_context() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["answer"]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        SlowPdfSource,
        OrchestratorSettings {
            pdf_timeout: Duration::from_millis(20),
            ..Default::default()
        },
    );
    let file = pdf_upload("ignored");

    let output = orchestrator
        .handle(&chat_form("Question", Language::English), Some(&file))
        .await;

    assert_eq!(output, "answer");
    assert_eq!(gateway.last_request().unwrap().user_message, "Question");
}

#[tokio::test]
async fn given_gateway_failure_when_handling_then_returns_displayable_error() {
    let gateway = Arc::new(MockModelGateway::failing());
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let output = orchestrator
        .handle(&chat_form("Question", Language::English), None)
        .await;

    assert!(!output.is_empty());
    assert!(output.starts_with("Error:"));
    assert!(!output.contains("simulated network failure"));
}

#[tokio::test]
async fn given_russian_caller_when_gateway_fails_then_marker_is_localized() {
    let gateway = Arc::new(MockModelGateway::failing());
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let output = orchestrator
        .handle(&chat_form("Вопрос", Language::Russian), None)
        .await;

    assert!(output.starts_with("Ошибка:"));
}

#[tokio::test]
async fn given_slow_gateway_when_handling_then_reports_timeout_distinctly() {
    let gateway = Arc::new(
        MockModelGateway::with_deltas(["late"]).with_delay(Duration::from_secs(5)),
    );
    let orchestrator = orchestrator(
        gateway,
        MockPdfTextSource::new(),
        OrchestratorSettings {
            gateway_timeout: Duration::from_millis(20),
            ..Default::default()
        },
    );

    let output = orchestrator
        .handle(&chat_form("Question", Language::English), None)
        .await;

    assert_eq!(output, "Error: the request timed out.");
}

#[tokio::test]
async fn given_strict_validation_when_message_blank_then_gateway_is_not_called() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["unused"]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        MockPdfTextSource::new(),
        OrchestratorSettings {
            strict_validation: true,
            ..Default::default()
        },
    );

    let output = orchestrator
        .handle(&chat_form("  ", Language::German), None)
        .await;

    assert_eq!(output, "Fehler: Pflichtfeld ist leer: message");
    assert!(gateway.last_request().is_none());
}

#[tokio::test]
async fn given_lenient_policy_when_study_plan_blank_then_request_still_sent() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["plan"]));
    let orchestrator = orchestrator(
        Arc::clone(&gateway),
        MockPdfTextSource::new(),
        OrchestratorSettings::default(),
    );
    let form = FormState {
        mode: Mode::StudyPlan,
        study_plan: StudyPlanFields::default(),
        ..Default::default()
    };

    let output = orchestrator.handle(&form, None).await;

    assert_eq!(output, "plan");
    assert!(
        gateway
            .last_request()
            .unwrap()
            .user_message
            .starts_with("Topic: \n")
    );
}

#[tokio::test]
async fn given_streamed_deltas_when_handling_stream_then_emits_growing_prefixes() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["Hel", "lo"]));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("Greet me", Language::English), None)
        .collect()
        .await;

    assert_eq!(updates, vec!["Hel".to_string(), "Hello".to_string()]);
}

#[tokio::test]
async fn given_empty_deltas_when_handling_stream_then_they_are_not_re_emitted() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["A", "", "B"]));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("q", Language::English), None)
        .collect()
        .await;

    assert_eq!(updates, vec!["A".to_string(), "AB".to_string()]);
}

#[tokio::test]
async fn given_mid_stream_failure_when_handling_stream_then_error_extends_prefix() {
    let gateway = Arc::new(MockModelGateway::failing_after(["Partial", " answer"]));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("q", Language::English), None)
        .collect()
        .await;

    assert_eq!(updates.len(), 3);
    for pair in updates.windows(2) {
        assert!(pair[1].starts_with(&pair[0]));
        assert!(pair[1].len() > pair[0].len());
    }
    assert!(updates[2].starts_with("Partial answer\n\nError:"));
}

#[tokio::test]
async fn given_gateway_refuses_stream_when_handling_stream_then_single_error_is_emitted() {
    let gateway = Arc::new(MockModelGateway::failing());
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("q", Language::Spanish), None)
        .collect()
        .await;

    assert_eq!(updates.len(), 1);
    assert!(updates[0].starts_with("Error: el asistente"));
}

#[tokio::test]
async fn given_silent_gateway_when_handling_stream_then_emits_one_empty_update() {
    let gateway = Arc::new(MockModelGateway::with_deltas(Vec::<String>::new()));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("q", Language::English), None)
        .collect()
        .await;

    assert_eq!(updates, vec![String::new()]);
}

#[tokio::test]
async fn given_abandoned_stream_when_next_request_runs_then_it_is_unaffected() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["one", "two"]));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let mut first = orchestrator.handle_stream(chat_form("q", Language::English), None);
    assert_eq!(first.next().await.as_deref(), Some("one"));
    drop(first);

    let updates: Vec<String> = orchestrator
        .handle_stream(chat_form("q", Language::English), None)
        .collect()
        .await;
    assert_eq!(updates, vec!["one".to_string(), "onetwo".to_string()]);
}

#[test]
fn given_any_state_when_clearing_then_returns_empty_triple() {
    let gateway = Arc::new(MockModelGateway::with_deltas(["x"]));
    let orchestrator = orchestrator(gateway, MockPdfTextSource::new(), Default::default());

    let reset = orchestrator.clear();

    assert_eq!(reset.message, "");
    assert_eq!(reset.output, "");
    assert_eq!(reset.file, None);
    assert_eq!(reset, clear_form());
    assert_eq!(clear_form(), FormReset::default());
}

#[tokio::test]
async fn given_pdf_upload_when_previewing_then_returns_extracted_text() {
    let orchestrator = orchestrator(
        Arc::new(MockModelGateway::with_deltas(["unused"])),
        MockPdfTextSource::new(),
        OrchestratorSettings::default(),
    );
    let file = pdf_upload("Chapter 1: cells");

    let preview = orchestrator.preview_pdf(Language::English, Some(&file)).await;

    assert_eq!(preview, "Chapter 1: cells");
}

#[tokio::test]
async fn given_long_pdf_when_previewing_then_text_is_capped_with_ellipsis() {
    let orchestrator = orchestrator(
        Arc::new(MockModelGateway::with_deltas(["unused"])),
        MockPdfTextSource::new(),
        OrchestratorSettings {
            pdf_preview_chars: 5,
            ..Default::default()
        },
    );
    let file = pdf_upload("Клетка и мембрана");

    let preview = orchestrator.preview_pdf(Language::Russian, Some(&file)).await;

    assert_eq!(preview, "Клетк...");
}

#[tokio::test]
async fn given_unreadable_pdf_when_previewing_then_localized_error_is_shown() {
    let orchestrator = orchestrator(
        Arc::new(MockModelGateway::with_deltas(["unused"])),
        MockPdfTextSource::failing(),
        OrchestratorSettings::default(),
    );
    let file = pdf_upload("unreadable");

    let preview = orchestrator.preview_pdf(Language::Russian, Some(&file)).await;

    assert_eq!(preview, "Ошибка: не удалось обработать PDF-файл.");
    assert!(!preview.contains("simulated"));
}

#[tokio::test]
async fn given_slow_pdf_source_when_previewing_then_timeout_is_reported() {
    let orchestrator = orchestrator(
        Arc::new(MockModelGateway::with_deltas(["unused"])),
        SlowPdfSource,
        OrchestratorSettings {
            pdf_timeout: Duration::from_millis(20),
            ..Default::default()
        },
    );
    let file = pdf_upload("ignored");

    let preview = orchestrator.preview_pdf(Language::English, Some(&file)).await;

    assert_eq!(preview, "Error: the request timed out.");
}

#[tokio::test]
async fn given_no_upload_when_previewing_then_preview_is_empty() {
    let orchestrator = orchestrator(
        Arc::new(MockModelGateway::with_deltas(["unused"])),
        PanickingPdfSource,
        OrchestratorSettings::default(),
    );

    assert_eq!(orchestrator.preview_pdf(Language::English, None).await, "");
}
