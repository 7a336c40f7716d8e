use std::collections::HashMap;

use axum::http::Uri;

/// Decoded query string keeping the first value of each repeated key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FirstParams(HashMap<String, String>);

impl FirstParams {
    pub fn from_uri(uri: &Uri) -> Self {
        let mut params = HashMap::new();
        if let Some(query) = uri.query() {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                params
                    .entry(key.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }
        Self(params)
    }

    /// Removes and returns `name`.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }
}
