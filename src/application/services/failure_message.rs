use crate::application::ports::PdfTextSourceError;
use crate::domain::Language;

use super::request_orchestrator::OrchestratorError;
use super::validation::ValidationError;

fn failure_marker(language: Language) -> &'static str {
    match language {
        Language::English => "Error:",
        Language::Russian => "Ошибка:",
        Language::Spanish => "Error:",
        Language::German => "Fehler:",
    }
}

/// Renders a failure as display text in the caller's language.
///
/// Gateway details stay in the logs; the user only sees the category.
pub fn failure_message(language: Language, error: &OrchestratorError) -> String {
    let body = match error {
        OrchestratorError::Gateway(_) => match language {
            Language::English => {
                "the assistant could not generate a response. Please try again later.".to_string()
            }
            Language::Russian => {
                "не удалось получить ответ от ассистента. Попробуйте позже.".to_string()
            }
            Language::Spanish => {
                "el asistente no pudo generar una respuesta. Inténtelo de nuevo más tarde."
                    .to_string()
            }
            Language::German => {
                "der Assistent konnte keine Antwort erzeugen. Bitte versuchen Sie es später erneut."
                    .to_string()
            }
        },
        OrchestratorError::Timeout(_) => match language {
            Language::English => "the request timed out.".to_string(),
            Language::Russian => "время ожидания запроса истекло.".to_string(),
            Language::Spanish => "la solicitud superó el tiempo de espera.".to_string(),
            Language::German => "die Anfrage hat das Zeitlimit überschritten.".to_string(),
        },
        OrchestratorError::Validation(ValidationError::MissingField(field)) => {
            match language {
                Language::English => format!("required field is empty: {}", field),
                Language::Russian => format!("не заполнено обязательное поле: {}", field),
                Language::Spanish => format!("falta un campo obligatorio: {}", field),
                Language::German => format!("Pflichtfeld ist leer: {}", field),
            }
        }
        OrchestratorError::Pdf(PdfTextSourceError::UnsupportedContentType(_)) => {
            match language {
                Language::English => "only PDF files can be read.".to_string(),
                Language::Russian => "поддерживаются только файлы PDF.".to_string(),
                Language::Spanish => "solo se pueden leer archivos PDF.".to_string(),
                Language::German => "es können nur PDF-Dateien gelesen werden.".to_string(),
            }
        }
        OrchestratorError::Pdf(PdfTextSourceError::NoTextFound(_)) => match language {
            Language::English => "the PDF contains no extractable text.".to_string(),
            Language::Russian => "в PDF нет извлекаемого текста.".to_string(),
            Language::Spanish => "el PDF no contiene texto extraíble.".to_string(),
            Language::German => "das PDF enthält keinen extrahierbaren Text.".to_string(),
        },
        OrchestratorError::Pdf(PdfTextSourceError::ExtractionFailed(_)) => match language {
            Language::English => "the PDF file could not be processed.".to_string(),
            Language::Russian => "не удалось обработать PDF-файл.".to_string(),
            Language::Spanish => "no se pudo procesar el archivo PDF.".to_string(),
            Language::German => "die PDF-Datei konnte nicht verarbeitet werden.".to_string(),
        },
    };

    format!("{} {}", failure_marker(language), body)
}
