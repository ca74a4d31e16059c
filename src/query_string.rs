use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_page(&self) -> u32 {
        self.items.get("page")
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|val| *val > 0)
            .unwrap_or(1)
    }

    /// Local path to go back to. Anything that could leave the site becomes `/`.
    pub fn get_back(&self) -> String {
        match self.items.get("back") {
            Some(back) if back.starts_with('/') && !back.starts_with("//") && !back.contains('\\') => back.clone(),
            _ => "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("").get_page(), 1);
    }

    #[test]
    fn test_get_back() {
        assert_eq!(QueryString::from("back=%2Fen%2Fblog%2F").get_back(), "/en/blog/");
        assert_eq!(QueryString::from("back=https%3A%2F%2Fevil.example").get_back(), "/");
        assert_eq!(QueryString::from("back=%2F%2Fevil.example").get_back(), "/");
        assert_eq!(QueryString::from("x=1").get_back(), "/");
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9";
        let meal = vec![
            ("bread".to_owned(), "baguette".to_owned()),
            ("cheese".to_owned(), "comté".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: meal });
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let expected: HashMap<String, String> = [("key-only".to_string(), String::new())].into_iter().collect();
        assert_eq!(QueryString::from("key-only"), QueryString { items: expected });
    }
}
