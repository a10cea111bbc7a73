//! Per-language delimiter resolution, memoized for the life of the process.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use toggler_lang::{DelimiterConfig, FALLBACK_LANGUAGE, LanguageCommentSource, LanguageError};
use tracing::{debug, warn};

use crate::error::ToggleError;

static DELIMITER_CACHE: LazyLock<Mutex<HashMap<String, Arc<DelimiterConfig>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Delimiters for a language, plus the warning to show if they had to be substituted.
#[derive(Debug, Clone)]
pub struct ResolvedDelimiters {
    /// The delimiter forms to use.
    pub config: Arc<DelimiterConfig>,
    /// A [`ToggleError::Warning`], set when the language could not be resolved and
    /// javascript-style comments were used.
    pub warning: Option<ToggleError>,
}

/// Look up the delimiters for `language_id`, caching the result.
///
/// A language that cannot be resolved falls back to the `javascript` tokens (or plain C-style
/// comments if the source lacks those too). The fallback is cached under the requested id, so
/// the warning is only reported the first time.
pub fn resolve_delimiters(
    source: &dyn LanguageCommentSource,
    language_id: &str,
) -> ResolvedDelimiters {
    if let Some(config) = DELIMITER_CACHE.lock().get(language_id) {
        return ResolvedDelimiters {
            config: Arc::clone(config),
            warning: None,
        };
    }

    let (config, warning) = match load(source, language_id) {
        Ok(config) => {
            debug!(language = language_id, "loaded comment delimiters");
            (config, None)
        }
        Err(err) => {
            let message = format!(
                "Unable to load configuration for language '{language_id}': {err}. Falling back to javascript-style comments."
            );
            warn!("{message}");
            let fallback = load(source, FALLBACK_LANGUAGE).unwrap_or_else(|_| DelimiterConfig::c_style());
            (fallback, Some(ToggleError::warning(message)))
        }
    };

    let config = Arc::new(config);
    DELIMITER_CACHE
        .lock()
        .insert(language_id.to_string(), Arc::clone(&config));
    ResolvedDelimiters { config, warning }
}

fn load(
    source: &dyn LanguageCommentSource,
    language_id: &str,
) -> Result<DelimiterConfig, LanguageError> {
    let tokens = source.comment_tokens(language_id)?;
    DelimiterConfig::from_tokens(language_id, &tokens)
}

/// Forget every cached language. Intended for tests.
pub fn clear_delimiter_cache() {
    DELIMITER_CACHE.lock().clear();
}
