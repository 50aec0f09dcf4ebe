use serde::{Deserialize, Deserializer};

pub fn default_page() -> u32 {
    1
}

// Query strings arrive as text, and clients send all sorts of junk for
// `page`. Anything that is not a positive integer falls back to page 1
// rather than rejecting the request.
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or_else(default_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default = "default_page", deserialize_with = "deserialize_page")]
        page: u32,
    }

    fn parse(query: &str) -> u32 {
        serde_urlencoded::from_str::<PageQuery>(query).unwrap().page
    }

    #[test]
    fn valid_page_is_kept() {
        assert_eq!(parse("page=3"), 3);
    }

    #[test]
    fn missing_page_defaults_to_one() {
        assert_eq!(parse(""), 1);
    }

    #[test]
    fn garbage_page_defaults_to_one() {
        assert_eq!(parse("page=abc"), 1);
        assert_eq!(parse("page=-2"), 1);
        assert_eq!(parse("page=0"), 1);
    }
}
