use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityResolution {
    #[serde(default)]
    pub values: Vec<String>,
}

/// A structured value the recognizer pulled out of the user's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub resolution: EntityResolution,
}

impl Entity {
    pub fn first_value(&self) -> Option<&str> {
        self.resolution.values.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedIntent {
    pub name: String,
    pub score: f64,
    pub entities: Vec<Entity>,
}

impl RecognizedIntent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 1.0,
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity_type: &str, value: &str) -> Self {
        self.entities.push(Entity {
            entity_type: entity_type.to_string(),
            entity: value.to_string(),
            resolution: EntityResolution {
                values: vec![value.to_string()],
            },
        });
        self
    }

    /// Resolved value of the first entity of the given type, if it has one.
    pub fn resolved_entity(&self, entity_type: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|entity| entity.entity_type == entity_type)
            .and_then(Entity::first_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entity_of_type_wins() {
        let intent = RecognizedIntent::new("SubmitTicket")
            .with_entity("category", "hardware")
            .with_entity("category", "software");
        assert_eq!(intent.resolved_entity("category"), Some("hardware"));
        assert_eq!(intent.resolved_entity("severity"), None);
    }

    #[test]
    fn entity_without_resolution_yields_nothing() {
        let mut intent = RecognizedIntent::new("SubmitTicket");
        intent.entities.push(Entity {
            entity_type: "severity".to_string(),
            entity: "asap".to_string(),
            resolution: EntityResolution::default(),
        });
        intent = intent.with_entity("severity", "high");
        assert_eq!(intent.resolved_entity("severity"), None);
    }
}
