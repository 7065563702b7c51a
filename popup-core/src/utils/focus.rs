use crate::dom::Document;
use crate::time::sleep_ms;

pub const FOCUS_RETRY_COUNT: usize = 5;
pub const FOCUS_RETRY_INTERVAL_MS: u64 = 50;

/// Focus `node` repeatedly for a short while.
///
/// An element that just became visible (e.g. a dialog whose `display` flips
/// with its active class) may not accept focus on the first attempt.
pub async fn force_focus<D: Document>(document: &D, node: &D::Node) {
    for _ in 0..FOCUS_RETRY_COUNT {
        document.focus(node);
        sleep_ms(FOCUS_RETRY_INTERVAL_MS).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_focuses_fixed_number_of_times() {
        let doc = MemoryDocument::new();
        let button = doc.append_element(doc.body_id(), "button");

        let start = tokio::time::Instant::now();
        force_focus(&doc, &button).await;

        assert_eq!(doc.focused(), Some(button));
        assert_eq!(doc.focus_history(), vec![button; FOCUS_RETRY_COUNT]);
        assert!(
            start.elapsed()
                >= Duration::from_millis(FOCUS_RETRY_INTERVAL_MS * FOCUS_RETRY_COUNT as u64)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_catches_element_that_becomes_focusable_late() {
        let doc = MemoryDocument::new();
        let button = doc.create_element("button");

        let attach = {
            let doc = doc.clone();
            async move {
                sleep_ms(FOCUS_RETRY_INTERVAL_MS + 10).await;
                doc.append_child(doc.body_id(), button);
            }
        };
        tokio::join!(force_focus(&doc, &button), attach);

        assert_eq!(doc.focused(), Some(button));
        assert!(doc.focus_history().len() < FOCUS_RETRY_COUNT);
    }
}
