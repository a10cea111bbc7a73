//! Optional follow-up formatting after a comment toggle.
//!
//! The toggle itself never depends on the formatter: a missing or failing formatter is turned
//! into a warning and the toggled text stays in place.

use std::collections::HashSet;
use std::sync::LazyLock;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::buffer::TextBuffer;
use crate::error::{ToggleError, ToggleResult};
use crate::position::Selection;

/// Formatter id used when the host has not registered one.
pub const DEFAULT_FORMATTER_ID: &str = "rewrap";

static ACTIVATED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Failure reported by a [`PostProcessor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PostProcessError(pub String);

/// A formatter that reflows a freshly toggled comment.
pub trait PostProcessor {
    /// Stable id, used for activation bookkeeping and messages.
    fn id(&self) -> &str;

    /// One-time setup. Called at most once per id per process if it succeeds.
    fn activate(&self) -> Result<(), PostProcessError> {
        Ok(())
    }

    /// Reformat the text covered by `selection`.
    fn run(&self, buffer: &mut TextBuffer, selection: Selection) -> Result<(), PostProcessError>;
}

fn ensure_activated(processor: &dyn PostProcessor) -> Result<(), PostProcessError> {
    let mut activated = ACTIVATED.lock();
    if activated.contains(processor.id()) {
        return Ok(());
    }
    processor.activate()?;
    debug!(formatter = processor.id(), "formatter activated");
    activated.insert(processor.id().to_string());
    Ok(())
}

/// Run `processor` over `selection`. Failure is a [`ToggleError::Warning`]; whatever the
/// processor managed to do stays applied.
pub fn run_post_processor(
    processor: Option<&dyn PostProcessor>,
    buffer: &mut TextBuffer,
    selection: Selection,
) -> ToggleResult<()> {
    let (id, result) = match processor {
        Some(processor) => (
            processor.id().to_string(),
            ensure_activated(processor).and_then(|()| processor.run(buffer, selection)),
        ),
        None => (
            DEFAULT_FORMATTER_ID.to_string(),
            Err(PostProcessError(format!(
                "Formatter '{DEFAULT_FORMATTER_ID}' not found!"
            ))),
        ),
    };

    let Err(err) = result else {
        return Ok(());
    };
    let message = format!(
        "Formatter '{id}' is required in order to auto-format comments (see setting autoFormatOnToggleCommentType). Please ensure it has been properly installed/enabled: {err}"
    );
    warn!("{message}");
    Err(ToggleError::warning(message))
}

/// Forget which formatters have been activated. Intended for tests.
pub fn clear_activated_post_processors() {
    ACTIVATED.lock().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        activations: AtomicUsize,
    }

    impl PostProcessor for Counting {
        fn id(&self) -> &str {
            "unit-test-counting"
        }

        fn activate(&self) -> Result<(), PostProcessError> {
            self.activations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn run(&self, _: &mut TextBuffer, _: Selection) -> Result<(), PostProcessError> {
            Ok(())
        }
    }

    #[test]
    fn test_activation_is_memoized() {
        let processor = Counting {
            activations: AtomicUsize::new(0),
        };
        let mut buffer = TextBuffer::new("x");
        let selection = buffer.primary_selection();
        assert_eq!(run_post_processor(Some(&processor), &mut buffer, selection), Ok(()));
        assert_eq!(run_post_processor(Some(&processor), &mut buffer, selection), Ok(()));
        assert_eq!(processor.activations.load(Ordering::SeqCst), 1);

        clear_activated_post_processors();
        assert_eq!(run_post_processor(Some(&processor), &mut buffer, selection), Ok(()));
        assert_eq!(processor.activations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_formatter_warns() {
        let mut buffer = TextBuffer::new("x");
        let selection = buffer.primary_selection();
        let err = run_post_processor(None, &mut buffer, selection).unwrap_err();
        assert!(matches!(err, ToggleError::Warning(_)));
        let warning = err.to_string();
        assert!(warning.starts_with("Formatter 'rewrap' is required in order to auto-format comments"));
        assert!(warning.ends_with("Formatter 'rewrap' not found!"));
    }
}
