use crate::pages::Page;

/// Request path split around the script name, without the leading slash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestPath {
    /// Script name, empty when the site runs without one.
    pub script: String,

    /// Path including the script name.
    pub request: String,

    /// Path after the script name.
    pub relative: String,

    /// Query string without the question mark.
    pub query: Option<String>,
}

impl RequestPath {
    /// Parses the path and the optional query, as in `/index.php/en/foo?bar=1`.
    pub fn parse(path_and_query: &str, script: &str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (path_and_query, None),
        };
        let script = script.trim_matches('/');
        let request = path.trim_start_matches('/');
        let relative = match request.strip_prefix(script) {
            Some(rest) if !script.is_empty() && (rest.is_empty() || rest.starts_with('/')) => {
                rest.trim_start_matches('/')
            }
            _ => request,
        };
        Self {
            script: script.to_string(),
            request: request.to_string(),
            relative: relative.to_string(),
            query,
        }
    }

    /// Query string to append to a location, including the question mark.
    pub fn query_suffix(&self) -> String {
        self.query
            .as_deref()
            .map_or_else(String::new, |query| format!("?{}", query))
    }
}

/// Inbound request as seen by [`super::GoneResolver`].
pub struct GoneRequest<'a> {
    /// Root page detected for the request.
    pub root: &'a Page,

    pub path: &'a RequestPath,

    /// Full request URI, for error messages.
    pub uri: &'a str,

    pub preview: bool,
}
