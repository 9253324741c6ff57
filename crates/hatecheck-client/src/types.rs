//! Request and result types exchanged with the classification service.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate;

/// A text sample that passed validation. Only constructible through
/// [`AnalysisRequest::new`], so the length invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Trim and validate `raw_text`.
    pub fn new(raw_text: &str) -> Result<Self, ValidationError> {
        let text = validate::validate(raw_text)?;
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// The trimmed text that will be sent.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The service's verdict for one text sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Label exactly as returned by the service
    pub prediction: String,
    /// Probability of the returned label
    pub confidence: f64,
    /// Probability of the hate-speech class, whatever the label
    pub hate_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisMeta>,
}

impl AnalysisResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_label(&self.prediction)
    }

    /// `Confidence: 87.0% | Hate Probability: 12.0%`
    pub fn summary_line(&self) -> String {
        format!(
            "Confidence: {:.1}% | Hate Probability: {:.1}%",
            self.confidence * 100.0,
            self.hate_probability * 100.0
        )
    }
}

/// Diagnostic details the service may attach. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_detected: Option<String>,
}

impl AnalysisMeta {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// `(label, value)` pairs for the fields that are present.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(n) = self.text_length {
            entries.push(("Text length", n.to_string()));
        }
        if let Some(n) = self.word_count {
            entries.push(("Word count", n.to_string()));
        }
        if let Some(n) = self.sentence_count {
            entries.push(("Sentences", n.to_string()));
        }
        if let Some(lang) = &self.language_detected {
            entries.push(("Language", lang.clone()));
        }
        entries
    }
}

/// Reply of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_ready: bool,
}

impl HealthStatus {
    pub fn is_ready(&self) -> bool {
        self.model_ready
    }

    pub fn summary(&self) -> &'static str {
        if self.model_ready {
            "AI Model Ready"
        } else {
            "Model Loading..."
        }
    }
}

/// Typed reading of the service label.
///
/// Labels are matched whole after normalizing case, whitespace, `-` and
/// `_`. "Not Hate Speech" is therefore never mistaken for "Hate Speech".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    HateSpeech,
    NotHateSpeech,
    /// A label this client does not recognise, kept verbatim
    Other(String),
}

impl Verdict {
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .replace(['-', '_'], " ")
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "hate speech" | "hate" | "hateful" => Verdict::HateSpeech,
            "not hate speech" | "non hate speech" | "no hate speech" | "not hate" | "non hate"
            | "not hateful" => Verdict::NotHateSpeech,
            _ => Verdict::Other(label.to_string()),
        }
    }

    pub fn is_hate(&self) -> bool {
        matches!(self, Verdict::HateSpeech)
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Verdict::HateSpeech => "🚨",
            Verdict::NotHateSpeech => "✅",
            Verdict::Other(_) => "❔",
        }
    }
}
