use unicode_normalization::UnicodeNormalization;

/// Cleans a query before it is looked up
pub trait Preprocessor: Send + Sync {
    // Default: trim only, so lookups see the text as the article printed it
    fn process(&self, text: &str) -> String {
        text.trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Folds full-width/half-width variants before lookup
pub struct NfkcPreprocessor;

impl Preprocessor for NfkcPreprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], "").trim().to_string()
    }
}
