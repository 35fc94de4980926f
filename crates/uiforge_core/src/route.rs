use std::fmt;

use url::{form_urlencoded, Url};

/// Base used to resolve relative navigation targets; only path and query matter.
const NAVIGATION_BASE: &str = "http://uiforge.invalid/";

pub const ROOT_PATH: &str = "/";
pub const STRATEGY_EDITOR_PATH: &str = "/strategy-editor";
pub const RESULT_VIEW_PATH: &str = "/result-view";

const FILENAME_PARAM: &str = "filename";
const HISTORY_ID_PARAM: &str = "history_id";

/// A client page. All state carried across a navigation lives in here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Root,
    StrategyEditor {
        filename: Option<String>,
    },
    ResultView {
        history_id: Option<String>,
    },
}

impl Route {
    /// Parses a path (`/result-view?history_id=42`) or absolute URL.
    ///
    /// Unknown paths and unparsable input fall back to [`Route::Root`]; blank
    /// query values count as absent.
    pub fn parse(raw: &str) -> Self {
        let resolved = Url::parse(NAVIGATION_BASE).and_then(|base| base.join(raw.trim()));
        match resolved {
            Ok(url) => Self::from_url(&url),
            Err(_) => Route::Root,
        }
    }

    fn from_url(url: &Url) -> Self {
        match url.path().trim_end_matches('/') {
            STRATEGY_EDITOR_PATH => Route::StrategyEditor {
                filename: query_value(url, FILENAME_PARAM),
            },
            RESULT_VIEW_PATH => Route::ResultView {
                history_id: query_value(url, HISTORY_ID_PARAM),
            },
            _ => Route::Root,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Root => ROOT_PATH.to_string(),
            Route::StrategyEditor { filename: None } => STRATEGY_EDITOR_PATH.to_string(),
            Route::StrategyEditor {
                filename: Some(filename),
            } => with_query(STRATEGY_EDITOR_PATH, FILENAME_PARAM, filename),
            Route::ResultView { history_id: None } => RESULT_VIEW_PATH.to_string(),
            Route::ResultView {
                history_id: Some(id),
            } => with_query(RESULT_VIEW_PATH, HISTORY_ID_PARAM, id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn parses_navigation_surface() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse(""), Route::Root);
        assert_eq!(
            Route::parse("/strategy-editor"),
            Route::StrategyEditor { filename: None }
        );
        assert_eq!(
            Route::parse("/strategy-editor?filename=card_a.json"),
            Route::StrategyEditor {
                filename: Some("card_a.json".into())
            }
        );
        assert_eq!(
            Route::parse("/result-view?history_id=42"),
            Route::ResultView {
                history_id: Some("42".into())
            }
        );
    }

    #[test]
    fn blank_or_missing_history_id_is_absent() {
        assert_eq!(
            Route::parse("/result-view"),
            Route::ResultView { history_id: None }
        );
        assert_eq!(
            Route::parse("/result-view?history_id="),
            Route::ResultView { history_id: None }
        );
        assert_eq!(
            Route::parse("/result-view?other=1"),
            Route::ResultView { history_id: None }
        );
    }

    #[test]
    fn absolute_urls_and_unknown_paths() {
        assert_eq!(
            Route::parse("http://127.0.0.1:5000/result-view?history_id=abc"),
            Route::ResultView {
                history_id: Some("abc".into())
            }
        );
        assert_eq!(Route::parse("/static/css/app.css"), Route::Root);
    }

    #[test]
    fn formats_with_encoded_query() {
        let route = Route::StrategyEditor {
            filename: Some("card a&b.json".into()),
        };
        let path = route.to_path();
        assert_eq!(path, "/strategy-editor?filename=card+a%26b.json");
        assert_eq!(Route::parse(&path), route);
        assert_eq!(Route::Root.to_string(), "/");
    }
}
