use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: Url,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// The URL with the query parameters appended, as it goes on the wire.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }
}
