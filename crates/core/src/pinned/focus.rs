//! Query parameters of the current scope (the URL of the page the picker lives on).

use ak_protocol::{EntityId, SENTINEL_ENTITY_ID};
use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    params: Vec<(String, String)>,
}

impl ScopeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a form-encoded query such as `a=1&b=2`, with or without a
    /// leading `?`. Names and values are percent- and `+`-decoded.
    ///
    /// A bare name without `=` gets an empty value.
    pub fn parse(query: &str) -> Self {
        let params = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();
        Self { params }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    /// The entity ID named by `param`; `None` when absent, unparsable or the sentinel.
    pub fn focused_id(&self, param: &str) -> Option<EntityId> {
        self.get(param)?
            .trim()
            .parse::<EntityId>()
            .ok()
            .filter(|id| *id != SENTINEL_ENTITY_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = ScopeParams::parse("?assistantId=12&chatId=abc&flag");
        assert_eq!(params.get("assistantId"), Some("12"));
        assert_eq!(params.get("chatId"), Some("abc"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_parse_decodes_values() {
        let params = ScopeParams::parse("assistantId=%34&name=a%20b+c");
        assert_eq!(params.get("name"), Some("a b c"));
        assert_eq!(params.focused_id("assistantId"), Some(4));
    }

    #[test]
    fn test_focused_id() {
        assert_eq!(
            ScopeParams::parse("assistantId=12").focused_id("assistantId"),
            Some(12)
        );
        assert_eq!(ScopeParams::new().focused_id("assistantId"), None);
        assert_eq!(
            ScopeParams::parse("assistantId=twelve").focused_id("assistantId"),
            None
        );
        assert_eq!(
            ScopeParams::parse("assistantId=0").focused_id("assistantId"),
            None
        );
    }
}
