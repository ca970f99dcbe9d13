use std::sync::Arc;

use crate::models::Quiz;

use super::loader::{parse_catalog, LoadError};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// The quizzes a player can choose from, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    quizzes: Vec<Arc<Quiz>>,
}

impl Catalog {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: quizzes.into_iter().map(Arc::new).collect(),
        }
    }

    /// The quizzes shipped with the binary.
    pub fn builtin() -> Result<Self, LoadError> {
        parse_catalog(BUILTIN_CATALOG, "built-in catalog")
    }

    pub fn quizzes(&self) -> &[Arc<Quiz>] {
        &self.quizzes
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Quiz>> {
        self.quizzes.iter().find(|quiz| quiz.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.quizzes.iter().position(|quiz| quiz.id == id)
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}
