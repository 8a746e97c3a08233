// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary draft, result and create-request models.

use crate::error::UnknownValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Highest score a reflection slider can take.
pub const MAX_SCORE: u8 = 10;

/// Reflection prompts, in slider order. The backend keys scores by text.
pub const REFLECTION_QUESTIONS: [&str; 6] = [
    "당신의 가장 깊은 내면의 생각과 감정들을 어느 정도 표현했나요?",
    "당신의 현재 느끼는 슬픔은 어느 정도인가요?",
    "당신의 현재 느끼는 분노는 어느 정도인가요?",
    "당신이 현재 느끼는 행복감은 어느 정도인가요?",
    "오늘의 글쓰기가 어느 정도 당신에게 가치있고 의미있는 일이었나요?",
    "이후에 참고할 수 있도록 오늘의 글쓰기에 점수를 매긴다면 어느 정도인가요?",
];

/// Mood picked on the first authoring step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Emotion {
    Happy,
    Love,
    Sad,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "HAPPY",
            Emotion::Love => "LOVE",
            Emotion::Sad => "SAD",
        }
    }
}

impl FromStr for Emotion {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HAPPY" => Ok(Emotion::Happy),
            "LOVE" => Ok(Emotion::Love),
            "SAD" => Ok(Emotion::Sad),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Round a slider value and pin it into `0..=10`. Non-finite input is 0.
pub fn clamp_score(n: f64) -> u8 {
    if !n.is_finite() {
        return 0;
    }
    n.round().clamp(0.0, MAX_SCORE as f64) as u8
}

/// Loose numeric coercion for stored reflection entries.
fn score_from_value(value: &Value) -> u8 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    };
    clamp_score(n)
}

/// Diary entry captured by the authoring form, awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryDraft {
    pub emotion: Emotion,
    pub content: String,
    pub reflections: Vec<u8>,
    #[serde(rename = "createdAtISO")]
    pub created_at_iso: String,
}

impl DiaryDraft {
    /// Parse a stored draft, tolerating loosely-typed reflection entries.
    ///
    /// Returns `None` for anything that is not an object with a known
    /// emotion, string content, an array of reflections and a string date.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let emotion = obj.get("emotion")?.as_str()?.parse().ok()?;
        let content = obj.get("content")?.as_str()?.to_string();
        let reflections = obj
            .get("reflections")?
            .as_array()?
            .iter()
            .map(score_from_value)
            .collect();
        let created_at_iso = obj.get("createdAtISO")?.as_str()?.to_string();

        Some(Self {
            emotion,
            content,
            reflections,
            created_at_iso,
        })
    }

    /// Score entries for the create request, one per reflection question.
    /// Missing sliders count as 0.
    pub fn question_scores(&self) -> Vec<QuestionScore> {
        REFLECTION_QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, text)| QuestionScore {
                question_text: (*text).to_string(),
                score: self.reflections.get(i).copied().unwrap_or(0).min(MAX_SCORE),
            })
            .collect()
    }
}

/// Summary handed from the backend to the summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryResult {
    pub summary: String,
}

impl DiaryResult {
    /// Structural check: an object carrying a string `summary`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let summary = value.as_object()?.get("summary")?.as_str()?;
        Some(Self {
            summary: summary.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub question_text: String,
    pub score: u8,
}

/// Body of the create-diary call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryCreateRequest {
    pub date: DateTime<Utc>,
    pub emotion: Emotion,
    pub content: String,
    pub question_scores: Vec<QuestionScore>,
}

/// Values collected by the two-step authoring form.
#[derive(Debug, Clone, Validate)]
pub struct DraftForm {
    #[validate(required(message = "emotion must be selected"))]
    pub emotion: Option<Emotion>,
    #[validate(custom(function = "validate_content"))]
    pub content: String,
    #[validate(custom(function = "validate_reflections"))]
    pub reflections: Vec<u8>,
    pub written_on: NaiveDate,
}

impl DraftForm {
    /// Validated draft with trimmed content.
    pub fn into_draft(self) -> Result<DiaryDraft, validator::ValidationErrors> {
        self.validate()?;
        let emotion = match self.emotion {
            Some(emotion) => emotion,
            None => {
                let mut errors = validator::ValidationErrors::new();
                errors.add("emotion", ValidationError::new("required"));
                return Err(errors);
            }
        };

        Ok(DiaryDraft {
            emotion,
            content: self.content.trim().to_string(),
            reflections: self.reflections,
            created_at_iso: self.written_on.format("%Y-%m-%d").to_string(),
        })
    }
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::new("empty_content"));
    }
    Ok(())
}

fn validate_reflections(reflections: &[u8]) -> Result<(), ValidationError> {
    if reflections.len() != REFLECTION_QUESTIONS.len() {
        return Err(ValidationError::new("reflection_count"));
    }
    if reflections.iter().any(|score| *score > MAX_SCORE) {
        return Err(ValidationError::new("reflection_range"));
    }
    Ok(())
}
