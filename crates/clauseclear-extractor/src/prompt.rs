//! Prompt construction for clause classification

use clauseclear_domain::traits::NumberedClause;

/// Builds the classification prompt for one batch
pub struct PromptBuilder<'a> {
    clauses: &'a [NumberedClause],
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder over a numbered batch
    pub fn new(clauses: &'a [NumberedClause]) -> Self {
        Self { clauses }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Here are the clauses to analyze:\n");
        for clause in self.clauses {
            prompt.push_str(&format!("{}. {}\n", clause.number, clause.text));
        }

        prompt.push_str("\nJSON Response:\n");
        prompt
    }
}

/// Schema passed to providers that support structured output
pub const CLASSIFICATION_SCHEMA: &str = r#"{
  "type": "array",
  "items": {
    "type": "object",
    "properties": {
      "id": {"type": "integer"},
      "severity": {"type": "string", "enum": ["Low", "Medium", "High", "Info"]},
      "justification": {"type": "string"}
    },
    "required": ["id", "severity"]
  }
}"#;

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You explain contract clauses in simple, plain English that a 14-year-old could follow.

Analyze the following numbered list of contract clauses. For each clause, identify any potential risks, unfair terms, or important points.

You MUST respond with a valid JSON array of objects, where each object has the keys "id" (the clause number as an integer), "severity" ("Low", "Medium", "High", or "Info"), and "justification" (a short plain-English explanation).

Example Response:
[
    {"id": 1, "severity": "Medium", "justification": "You have to pay for all repairs, which could be expensive."},
    {"id": 2, "severity": "Info", "justification": "This just gives the address of the property."}
]"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_numbered_clauses() {
        let batch = vec![
            NumberedClause {
                number: 1,
                text: "The tenant pays for all repairs.".to_string(),
            },
            NumberedClause {
                number: 2,
                text: "The property is at 12 Park Street.".to_string(),
            },
        ];
        let prompt = PromptBuilder::new(&batch).build();

        assert!(prompt.contains("1. The tenant pays for all repairs.\n"));
        assert!(prompt.contains("2. The property is at 12 Park Street.\n"));
        assert!(prompt.contains("valid JSON array"));
        assert!(prompt.ends_with("JSON Response:\n"));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CLASSIFICATION_SCHEMA).unwrap();
        assert_eq!(schema["type"], "array");
    }
}
