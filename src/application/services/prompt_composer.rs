use crate::domain::{
    ChatFields, ComposedRequest, ConversationTurn, FormState, Mode, PdfContext, SamplingParams,
    StudyPlanFields, StylePreferences,
};

/// Marker that opens the PDF section of a user message.
pub const PDF_CONTEXT_MARKER: &str = "Additional context from PDF:";

pub const DEFAULT_PDF_MAX_CHARS: usize = 10_000;

/// Behavioural checklist for chat answers. Not applied unless configured.
pub const RECOMMENDED_CHAT_RULES: &[&str] = &[
    "Respond only in {language}.",
    "Use a {tone} tone throughout the answer.",
    "Be concise.",
    "Do not elaborate beyond what was requested.",
    "If you are unsure, say so directly.",
    "Do not rely on assumptions the user has not stated.",
    "Answer only the question that was asked.",
];

pub const RECOMMENDED_STUDY_PLAN_RULES: &[&str] = &[
    "Respond only in {language}.",
    "Produce a structured study plan.",
    "Use a {tone} tone throughout the plan.",
    "Rely only on the parameters provided.",
    "Give concrete, actionable steps.",
    "Include milestones with timeframes.",
    "Keep the workload within the stated weekly time budget.",
    "Match activities to the preferred learning method.",
];

const CHAT_DIRECTIVE: &str =
    "You are an AI educational assistant. Respond in {language} using a {tone} tone.";
const STUDY_PLAN_DIRECTIVE: &str = "You are an AI educational planner who builds personalized study plans. Respond in {language} using a {tone} tone.";
const RULES_HEADER: &str = "Follow these rules:";

#[derive(Debug, Clone)]
pub struct CompositionSettings {
    /// Rule strings may contain `{language}` and `{tone}` placeholders.
    pub chat_rules: Vec<String>,
    pub study_plan_rules: Vec<String>,
    pub sampling: SamplingParams,
    pub pdf_max_chars: usize,
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self {
            chat_rules: Vec::new(),
            study_plan_rules: Vec::new(),
            sampling: SamplingParams::default(),
            pdf_max_chars: DEFAULT_PDF_MAX_CHARS,
        }
    }
}

/// Turns form state into a system + user message pair.
///
/// Composition is pure: the same form and PDF context always produce the
/// same request. Fields that belong to the inactive mode are never read.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    settings: CompositionSettings,
}

impl PromptComposer {
    pub fn new(settings: CompositionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompositionSettings {
        &self.settings
    }

    /// Bounds raw extracted text to the configured PDF budget.
    pub fn pdf_context(&self, extracted: &str) -> PdfContext {
        PdfContext::from_extracted(extracted, self.settings.pdf_max_chars)
    }

    pub fn compose(&self, form: &FormState, pdf: &PdfContext) -> ComposedRequest {
        match form.mode {
            Mode::Chat => self.compose_chat(&form.chat, &form.style, pdf, &form.history),
            Mode::StudyPlan => self.compose_study_plan(&form.study_plan, &form.style, pdf),
        }
    }

    fn compose_chat(
        &self,
        fields: &ChatFields,
        style: &StylePreferences,
        pdf: &PdfContext,
        history: &[ConversationTurn],
    ) -> ComposedRequest {
        let mut user_message = fields.message.clone();
        append_pdf_section(&mut user_message, pdf);

        ComposedRequest {
            system_message: system_message(CHAT_DIRECTIVE, &self.settings.chat_rules, style),
            user_message,
            sampling: self.settings.sampling,
            history: history.to_vec(),
        }
    }

    fn compose_study_plan(
        &self,
        fields: &StudyPlanFields,
        style: &StylePreferences,
        pdf: &PdfContext,
    ) -> ComposedRequest {
        let mut user_message = study_plan_block(fields);
        append_pdf_section(&mut user_message, pdf);

        ComposedRequest {
            system_message: system_message(
                STUDY_PLAN_DIRECTIVE,
                &self.settings.study_plan_rules,
                style,
            ),
            user_message,
            sampling: self.settings.sampling,
            history: Vec::new(),
        }
    }
}

fn interpolate(template: &str, style: &StylePreferences) -> String {
    template
        .replace("{language}", style.language.as_str())
        .replace("{tone}", style.tone.as_str())
}

fn system_message(directive: &str, rules: &[String], style: &StylePreferences) -> String {
    let mut message = interpolate(directive, style);

    if !rules.is_empty() {
        message.push_str("\n\n");
        message.push_str(RULES_HEADER);
        for (idx, rule) in rules.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", idx + 1, interpolate(rule, style)));
        }
    }

    message
}

fn study_plan_block(fields: &StudyPlanFields) -> String {
    let level = fields
        .current_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_default();
    let time = fields
        .available_time_hours_per_week
        .map(|h| format!("{} hours per week", h))
        .unwrap_or_default();
    let method = fields
        .learning_method
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    [
        ("Topic", fields.topic.as_str()),
        ("Current level", level.as_str()),
        ("Available time", time.as_str()),
        ("Learning method", method.as_str()),
        ("Goal", fields.goal.as_str()),
    ]
    .iter()
    .map(|(label, value)| format!("{}: {}", label, value))
    .collect::<Vec<_>>()
    .join("\n")
}

fn append_pdf_section(user_message: &mut String, pdf: &PdfContext) {
    if pdf.is_empty() {
        return;
    }
    user_message.push_str("\n\n");
    user_message.push_str(PDF_CONTEXT_MARKER);
    user_message.push('\n');
    user_message.push_str(pdf.as_str());
}
