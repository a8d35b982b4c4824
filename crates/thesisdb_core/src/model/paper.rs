//! Paper input record, its validator and the keyword blob codec.
//!
//! # Invariants
//! - A validated paper carries between `KEYWORDS_MIN` and `KEYWORDS_MAX`
//!   keywords, in submission order.
//! - The stored keyword blob is a JSON array and decodes back to the same
//!   sequence.

use super::validation::{optional_within_limit, required, required_within_limit, ValidationError};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_CHARS: usize = 256;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const MAIL_MAX_CHARS: usize = 256;
pub const KEYWORDS_MIN: usize = 4;
pub const KEYWORDS_MAX: usize = 6;

/// Raw paper input as received from an upper layer.
///
/// The uploaded document itself is not part of this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPaper {
    /// Free-form classification tag (thesis type, review status, ...).
    pub class: Option<String>,
    pub title_ja: Option<String>,
    pub title_en: Option<String>,
    pub description_ja: Option<String>,
    pub description_en: Option<String>,
    pub keywords: Option<Vec<String>>,
    /// Contact address. Only presence and length are checked.
    pub mail: Option<String>,
}

/// Paper record that passed every field rule and is ready for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedPaper {
    pub class: String,
    pub title_ja: String,
    pub title_en: String,
    pub description_ja: String,
    pub description_en: String,
    pub keywords: Vec<String>,
    pub mail: String,
}

impl NewPaper {
    pub fn new<K: Into<String>>(
        class: impl Into<String>,
        keywords: impl IntoIterator<Item = K>,
        mail: impl Into<String>,
    ) -> Self {
        Self {
            class: Some(class.into()),
            keywords: Some(keywords.into_iter().map(Into::into).collect()),
            mail: Some(mail.into()),
            ..Self::default()
        }
    }

    /// Validates in field order, stopping at the first violation.
    pub fn validate(&self) -> Result<ValidatedPaper, ValidationError> {
        let class = required("class", self.class.as_deref())?.to_string();
        let title_ja = optional_within_limit("title_ja", self.title_ja.as_deref(), TITLE_MAX_CHARS)?;
        let title_en = optional_within_limit("title_en", self.title_en.as_deref(), TITLE_MAX_CHARS)?;
        let description_ja = optional_within_limit(
            "description_ja",
            self.description_ja.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )?;
        let description_en = optional_within_limit(
            "description_en",
            self.description_en.as_deref(),
            DESCRIPTION_MAX_CHARS,
        )?;
        let keywords = validate_keywords(self.keywords.as_deref())?;
        let mail = required_within_limit("mail", self.mail.as_deref(), MAIL_MAX_CHARS)?;

        Ok(ValidatedPaper {
            class,
            title_ja,
            title_en,
            description_ja,
            description_en,
            keywords,
            mail,
        })
    }
}

fn validate_keywords(value: Option<&[String]>) -> Result<Vec<String>, ValidationError> {
    let keywords = value.ok_or(ValidationError::Required { field: "keywords" })?;
    let actual = keywords.len();
    if actual < KEYWORDS_MIN {
        return Err(ValidationError::TooFewKeywords {
            min: KEYWORDS_MIN,
            actual,
        });
    }
    if actual > KEYWORDS_MAX {
        return Err(ValidationError::TooManyKeywords {
            max: KEYWORDS_MAX,
            actual,
        });
    }
    Ok(keywords.to_vec())
}

/// Serializes keywords into the blob stored in `papers.keywords`.
pub fn encode_keywords(keywords: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(keywords)
}

/// Reverses [`encode_keywords`].
pub fn decode_keywords(blob: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(blob)
}

#[cfg(test)]
mod tests {
    use super::{decode_keywords, encode_keywords, NewPaper};
    use crate::model::validation::ValidationError;

    #[test]
    fn three_keywords_are_too_few() {
        let err = NewPaper::new("Master", ["a", "b", "c"], "x@example.com")
            .validate()
            .expect_err("three keywords must fail");
        assert_eq!(err, ValidationError::TooFewKeywords { min: 4, actual: 3 });
    }

    #[test]
    fn seven_keywords_are_too_many() {
        let err = NewPaper::new("Doctor", ["a", "b", "c", "d", "e", "f", "g"], "x@example.com")
            .validate()
            .expect_err("seven keywords must fail");
        assert_eq!(err, ValidationError::TooManyKeywords { max: 6, actual: 7 });
    }

    #[test]
    fn minimal_paper_defaults_optional_text() {
        let paper = NewPaper::new("Other", ["a", "b", "c", "d"], "x@example.com")
            .validate()
            .expect("paper should validate");
        assert_eq!(paper.title_ja, "");
        assert_eq!(paper.description_en, "");
        assert_eq!(paper.keywords, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn missing_class_is_checked_first() {
        let input = NewPaper {
            title_ja: Some("t".repeat(300)),
            ..NewPaper::default()
        };
        assert_eq!(
            input.validate().expect_err("missing class must fail"),
            ValidationError::Required { field: "class" }
        );
    }

    #[test]
    fn missing_keywords_and_mail_are_required() {
        let no_keywords = NewPaper {
            class: Some("Bachelor".to_string()),
            mail: Some("x@example.com".to_string()),
            ..NewPaper::default()
        };
        assert_eq!(
            no_keywords.validate().expect_err("keywords required"),
            ValidationError::Required { field: "keywords" }
        );

        let no_mail = NewPaper {
            mail: None,
            ..NewPaper::new("Bachelor", ["a", "b", "c", "d"], "")
        };
        assert_eq!(
            no_mail.validate().expect_err("mail required"),
            ValidationError::Required { field: "mail" }
        );
    }

    #[test]
    fn description_over_limit_is_rejected() {
        let input = NewPaper {
            description_en: Some("d".repeat(2001)),
            ..NewPaper::new("Other", ["a", "b", "c", "d"], "x@example.com")
        };
        let err = input.validate().expect_err("long description must fail");
        assert_eq!(err.field(), "description_en");
    }

    #[test]
    fn keyword_blob_preserves_separators_and_order() {
        let keywords = vec![
            "machine, learning".to_string(),
            "\"quoted\"".to_string(),
            "日本語".to_string(),
            String::new(),
        ];
        let blob = encode_keywords(&keywords).expect("encode should succeed");
        assert_eq!(decode_keywords(&blob).expect("decode should succeed"), keywords);
    }
}
