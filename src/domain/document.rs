//! Contenu riche des pages.
//!
//! L'éditeur du front enregistre son document sous forme d'un tableau JSON
//! de blocs (paragraphes, titres, liens, colonnes). Le backend ne
//! l'interprète pas : il vérifie seulement la forme générale avant de le
//! persister en JSONB.

use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Le contenu doit être un tableau de blocs JSON")]
    NotAnArray,
}

/// Vérifie qu'une valeur est un document éditeur valide.
pub fn ensure_document(value: &Value) -> Result<(), DocumentError> {
    if value.is_array() {
        Ok(())
    } else {
        Err(DocumentError::NotAnArray)
    }
}

/// Document vide, utilisé comme valeur par défaut à la création.
pub fn empty_document() -> Value {
    Value::Array(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_block_arrays() {
        let doc = json!([{ "type": "paragraph", "children": [{ "text": "Bonjour" }] }]);
        assert!(ensure_document(&doc).is_ok());
        assert!(ensure_document(&empty_document()).is_ok());
    }

    #[test]
    fn rejects_non_arrays() {
        assert_eq!(ensure_document(&json!("texte")), Err(DocumentError::NotAnArray));
        assert_eq!(ensure_document(&json!({"type": "paragraph"})), Err(DocumentError::NotAnArray));
        assert_eq!(ensure_document(&json!(null)), Err(DocumentError::NotAnArray));
    }
}
