// src/catalog.rs

use crate::model::Question;
use serde_json::Value;

/// Campos candidatos para el id, en orden de prioridad
const ID_FIELDS: [&str; 4] = ["id", "key", "codigo", "name"];
/// Campos candidatos para el texto de la pregunta
const TEXT_FIELDS: [&str; 5] = ["pregunta", "texto", "label", "nombre", "descripcion"];

/// Banco de preguntas cargado desde `/hechos`
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sustituye el catálogo completo (no mezcla con el anterior)
    pub fn replace(&mut self, raw: &[Value]) {
        self.questions = raw.iter().map(normalize_item).collect();
        if self.questions.is_empty() {
            log::warn!("/hechos no devolvió preguntas");
        } else {
            log::info!("catálogo cargado con {} preguntas", self.questions.len());
        }
    }

    /// Tras un fallo de conexión el catálogo queda vacío
    pub fn clear(&mut self) {
        self.questions.clear();
    }
}

/// Convierte un elemento heterogéneo del servicio en una `Question`
pub fn normalize_item(item: &Value) -> Question {
    if let Value::String(s) = item {
        return Question {
            id: s.clone(),
            text: s.clone(),
        };
    }

    let fallback = item.to_string();
    let id = first_field(item, &ID_FIELDS).unwrap_or_else(|| fallback.clone());
    let text = first_field(item, &TEXT_FIELDS).unwrap_or(fallback);
    Question { id, text }
}

fn first_field(item: &Value, fields: &[&str]) -> Option<String> {
    let obj = item.as_object()?;
    fields
        .iter()
        .filter_map(|f| obj.get(*f))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_string_is_id_and_text() {
        let q = normalize_item(&json!("olor_fuerte"));
        assert_eq!(q.id, "olor_fuerte");
        assert_eq!(q.text, "olor_fuerte");
    }

    #[test]
    fn alternate_field_names_follow_priority() {
        let q = normalize_item(&json!({
            "codigo": "c1",
            "name": "n1",
            "texto": "¿Texto?",
            "descripcion": "ignorada"
        }));
        assert_eq!(q.id, "c1");
        assert_eq!(q.text, "¿Texto?");

        let q = normalize_item(&json!({"id": "agua_turbia", "pregunta": "¿Agua turbia?"}));
        assert_eq!(q.id, "agua_turbia");
        assert_eq!(q.text, "¿Agua turbia?");
    }

    #[test]
    fn unknown_shape_falls_back_to_serialized_item() {
        let raw = json!({"foo": 1});
        let q = normalize_item(&raw);
        assert_eq!(q.id, raw.to_string());
        assert_eq!(q.text, raw.to_string());
    }

    #[test]
    fn non_string_fields_use_their_json_text() {
        let q = normalize_item(&json!({"id": 7, "id_extra": "x", "label": null, "nombre": "Ruido"}));
        assert_eq!(q.id, "7");
        assert_eq!(q.text, "Ruido");
    }

    #[test]
    fn replace_discards_previous_catalog() {
        let mut catalog = QuestionCatalog::default();
        catalog.replace(&[json!("a"), json!("b")]);
        assert_eq!(catalog.questions().len(), 2);
        catalog.replace(&[json!("c")]);
        assert_eq!(catalog.questions().len(), 1);
        assert_eq!(catalog.questions()[0].id, "c");
        catalog.clear();
        assert!(catalog.is_empty());
    }
}
