//! # Task Catalogue
//!
//! A task is one page: a prompt template, the fields that fill it, and the labels
//! shown around the result.

use crate::{
    prompts::{tasks::*, PromptTemplate},
    types::CompletionSettings,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    MailCorrection,
    OfficialCorrection,
    NewsTranslation,
    PromptMaker,
    OfficialAnalytic,
    SimpleChat,
}

/// How a task receives its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskInput {
    /// Plain text fields typed by the user.
    Form,
    /// An uploaded PDF whose extracted text fills the given placeholder.
    Document { placeholder: &'static str },
}

/// One input field of a page. `name` doubles as the template placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<&'static str>,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            default_value: None,
        }
    }
}

/// The static description of a page.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSpec {
    pub kind: TaskKind,
    pub subheader: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub input: TaskInput,
    pub fields: Vec<FieldSpec>,
    /// Prefix of the error notice shown when the completion fails.
    pub error_label: &'static str,
    pub temperature: f32,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::MailCorrection,
        TaskKind::OfficialCorrection,
        TaskKind::NewsTranslation,
        TaskKind::PromptMaker,
        TaskKind::OfficialAnalytic,
        TaskKind::SimpleChat,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TaskKind::MailCorrection => "mail_correction",
            TaskKind::OfficialCorrection => "official_correction",
            TaskKind::NewsTranslation => "news_translation",
            TaskKind::PromptMaker => "prompt_maker",
            TaskKind::OfficialAnalytic => "official_analytic",
            TaskKind::SimpleChat => "simple_chat",
        }
    }

    /// The built-in prompt template of this task.
    pub fn default_template(self) -> PromptTemplate {
        match self {
            TaskKind::MailCorrection => PromptTemplate::user(MAIL_CORRECTION_USER_PROMPT),
            TaskKind::OfficialCorrection => PromptTemplate::user(OFFICIAL_CORRECTION_USER_PROMPT),
            TaskKind::NewsTranslation => PromptTemplate::user(NEWS_TRANSLATION_USER_PROMPT),
            TaskKind::PromptMaker => {
                PromptTemplate::chat(PROMPT_MAKER_SYSTEM_PROMPT, PROMPT_MAKER_USER_PROMPT)
            }
            TaskKind::OfficialAnalytic => PromptTemplate::user(OFFICIAL_ANALYTIC_USER_PROMPT),
            TaskKind::SimpleChat => PromptTemplate::user(SIMPLE_CHAT_USER_PROMPT),
        }
    }

    pub fn spec(self) -> TaskSpec {
        match self {
            TaskKind::MailCorrection => TaskSpec {
                kind: self,
                subheader: "메일/메시지 첨삭",
                description: Some("작성한 메일/메시지를 교정, 교열, 맞춤법 검사 등을 해줍니다."),
                input: TaskInput::Form,
                fields: vec![
                    FieldSpec::required("title", "메일/메시지 제목"),
                    FieldSpec::required("input", "메일/메시지 내용"),
                ],
                error_label: "교정/교열 중 오류 발생",
                temperature: 0.2,
            },
            TaskKind::OfficialCorrection => TaskSpec {
                kind: self,
                subheader: "Correction Official",
                description: Some("작성한 공문을 교정, 교열, 맞춤법 검사 등을 해줍니다."),
                input: TaskInput::Form,
                fields: vec![
                    FieldSpec::required("title", "공문 제목"),
                    FieldSpec::required("input", "공문 내용"),
                ],
                error_label: "교정/교열 중 오류 발생",
                temperature: 0.2,
            },
            TaskKind::NewsTranslation => TaskSpec {
                kind: self,
                subheader: "News Translation",
                description: None,
                input: TaskInput::Form,
                fields: vec![FieldSpec::required("input", "NYT News")],
                error_label: "번역 중 오류 발생",
                temperature: 0.2,
            },
            TaskKind::PromptMaker => TaskSpec {
                kind: self,
                subheader: "프롬프트 생성기",
                description: None,
                input: TaskInput::Form,
                fields: vec![
                    FieldSpec::required("task", "목표"),
                    FieldSpec::required("lazy_prompt", "프롬프트"),
                ],
                error_label: "작업 중 오류 발생",
                temperature: 0.2,
            },
            TaskKind::OfficialAnalytic => TaskSpec {
                kind: self,
                subheader: "공문 분석기",
                description: Some("공문을 업로드하세요 (PDF 형식)"),
                input: TaskInput::Document {
                    placeholder: "texts",
                },
                fields: Vec::new(),
                error_label: "오류가 발생했습니다",
                temperature: 0.0,
            },
            TaskKind::SimpleChat => TaskSpec {
                kind: self,
                subheader: "뭐든지 질문하세요!",
                description: None,
                input: TaskInput::Form,
                fields: vec![FieldSpec {
                    name: "input",
                    label: "Your question",
                    required: true,
                    default_value: Some("What types of text models does OpenAI provide?"),
                }],
                error_label: "오류가 발생했습니다",
                temperature: 0.0,
            },
        }
    }
}

impl TaskSpec {
    /// Default completion settings of the page, before configuration overrides.
    pub fn default_settings(&self) -> CompletionSettings {
        CompletionSettings {
            temperature: self.temperature,
            ..Default::default()
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown task '{0}'")]
pub struct UnknownTask(pub String);

impl FromStr for TaskKind {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownTask(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_cover_template_placeholders() {
        for kind in TaskKind::ALL {
            let spec = kind.spec();
            let mut expected: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();
            if let TaskInput::Document { placeholder } = spec.input {
                expected.push(placeholder);
            }
            let mut placeholders = kind.default_template().placeholders();
            placeholders.sort();
            expected.sort_unstable();
            assert_eq!(placeholders, expected, "task {kind}");
        }
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in TaskKind::ALL {
            assert_eq!(kind.id().parse::<TaskKind>(), Ok(kind));
        }
        let err = "weather_report".parse::<TaskKind>().unwrap_err();
        assert_eq!(err, UnknownTask("weather_report".to_string()));
        assert_eq!(err.to_string(), "unknown task 'weather_report'");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
