use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Quiz, QuizValidationError};

use super::catalog::Catalog;

/// Errors raised while reading a quiz catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} must contain at least one quiz")]
    Empty(String),
    #[error("{origin}: quiz id {id:?} is used more than once")]
    DuplicateQuiz { origin: String, id: String },
    #[error("{origin}: quiz {id:?} is invalid: {source}")]
    InvalidQuiz {
        origin: String,
        id: String,
        #[source]
        source: QuizValidationError,
    },
}

pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&json_content, &path.display().to_string())
}

/// Parses and validates a JSON array of quizzes. `origin` names the source in errors.
pub fn parse_catalog(json: &str, origin: &str) -> Result<Catalog, LoadError> {
    let quizzes: Vec<Quiz> = serde_json::from_str(json).map_err(|source| LoadError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    if quizzes.is_empty() {
        return Err(LoadError::Empty(origin.to_string()));
    }

    let mut seen = HashSet::with_capacity(quizzes.len());
    for quiz in &quizzes {
        if !seen.insert(quiz.id.as_str()) {
            return Err(LoadError::DuplicateQuiz {
                origin: origin.to_string(),
                id: quiz.id.clone(),
            });
        }
        quiz.validate().map_err(|source| LoadError::InvalidQuiz {
            origin: origin.to_string(),
            id: quiz.id.clone(),
            source,
        })?;
    }

    tracing::info!(origin, quizzes = quizzes.len(), "catalog loaded");
    Ok(Catalog::new(quizzes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionError;

    const ONE_QUIZ: &str = r#"[{
        "id": "rust",
        "title": "Rust Basics",
        "description": "Ownership",
        "category": "Programming",
        "color": "red",
        "timeLimit": 120,
        "questions": [{
            "id": 1,
            "question": "Rust has a garbage collector.",
            "type": "true-false",
            "correctAnswer": "false",
            "explanation": "It uses ownership.",
            "difficulty": "easy"
        }]
    }]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(ONE_QUIZ, "inline").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("rust").unwrap().time_limit, 120);
    }

    #[test]
    fn test_parse_catalog_rejects_empty() {
        assert!(matches!(
            parse_catalog("[]", "inline"),
            Err(LoadError::Empty(origin)) if origin == "inline"
        ));
    }

    #[test]
    fn test_parse_catalog_rejects_duplicates() {
        let json = format!("[{0},{0}]", ONE_QUIZ.trim_start_matches('[').trim_end_matches(']'));
        assert!(matches!(
            parse_catalog(&json, "inline"),
            Err(LoadError::DuplicateQuiz { id, .. }) if id == "rust"
        ));
    }

    #[test]
    fn test_parse_catalog_rejects_invalid_question() {
        let json = ONE_QUIZ.replace(r#""correctAnswer": "false""#, r#""correctAnswer": 1"#);
        let err = parse_catalog(&json, "inline").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidQuiz {
                source: QuizValidationError::Question {
                    id: 1,
                    source: QuestionError::InvalidBoolean(_),
                },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_catalog_reports_syntax_errors() {
        assert!(matches!(
            parse_catalog("{ not json", "broken.json"),
            Err(LoadError::Parse { origin, .. }) if origin == "broken.json"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
