//! Search query for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// `?q=` search term shared by every list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive search term
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed term, or `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn into_term(self) -> Option<String> {
        self.term().map(str::to_string)
    }
}
