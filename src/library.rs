use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for questionnaire tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(pub u64);

/// Identifier wrapper for individual questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

/// Reusable questionnaire template: an ordered Category -> Topic -> Question tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub order: u32,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub order: u32,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub order: u32,
}

/// A question annotated with its position in the tree, as yielded by traversal.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRef<'a> {
    pub category: &'a Category,
    pub topic: &'a Topic,
    pub question: &'a Question,
}

impl Tool {
    /// Deterministic presentation-order traversal: every question exactly once,
    /// ordered by (category order, topic order, question order).
    pub fn questions(&self) -> Vec<QuestionRef<'_>> {
        let mut categories: Vec<&Category> = self.categories.iter().collect();
        categories.sort_by_key(|category| category.order);

        let mut refs = Vec::new();
        for category in categories {
            let mut topics: Vec<&Topic> = category.topics.iter().collect();
            topics.sort_by_key(|topic| topic.order);
            for topic in topics {
                let mut questions: Vec<&Question> = topic.questions.iter().collect();
                questions.sort_by_key(|question| question.order);
                for question in questions {
                    refs.push(QuestionRef {
                        category,
                        topic,
                        question,
                    });
                }
            }
        }
        refs
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|category| &category.topics)
            .map(|topic| topic.questions.len())
            .sum()
    }

    pub fn contains_question(&self, id: QuestionId) -> bool {
        self.categories
            .iter()
            .flat_map(|category| &category.topics)
            .flat_map(|topic| &topic.questions)
            .any(|question| question.id == id)
    }
}

/// Read-only registry of tools, shared across concurrent assessment cases.
///
/// Case-level operations never mutate the library; editing templates is an
/// administrative concern handled outside the engine.
#[derive(Debug, Default)]
pub struct QuestionLibrary {
    tools: HashMap<ToolId, Tool>,
}

impl QuestionLibrary {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            tools: tools.into_iter().map(|tool| (tool.id, tool)).collect(),
        }
    }

    pub fn tool(&self, id: ToolId) -> Option<&Tool> {
        self.tools.get(&id)
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}
