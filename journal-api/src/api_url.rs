use std::fmt;

/// Base URL of the journal backend, always stored without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(String);

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ApiUrl {
    pub fn new(base_url: &str) -> Self {
        Self(base_url.trim().trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", self.0, trimmed_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(
            ApiUrl::new("http://localhost:3001///").as_ref(),
            "http://localhost:3001"
        );
    }

    #[test]
    fn append_path_uses_single_separator() {
        let url = ApiUrl::new("https://journal.example.com/api/");
        assert_eq!(
            url.append_path("/entries/today").as_ref(),
            "https://journal.example.com/api/entries/today"
        );
        assert_eq!(
            url.append_path("streak").as_ref(),
            "https://journal.example.com/api/streak"
        );
    }
}
