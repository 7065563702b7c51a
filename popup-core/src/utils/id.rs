use uuid::Uuid;

/// A document-unique id for pairing a Dialog with its Triggers.
pub fn generate_id() -> String {
    format!("popup-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_id_is_prefixed() {
        assert!(generate_id().starts_with("popup-"));
    }
}
