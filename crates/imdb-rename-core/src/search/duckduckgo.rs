//! DuckDuckGo HTML endpoint adapter backed by `ureq`.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use super::{SearchHit, SearchProvider};
use crate::config::SearchConfig;
use crate::error::Error;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

lazy_static! {
    static ref RESULT_LINK: Regex =
        Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).unwrap();
    static ref RESULT_SNIPPET: Regex =
        Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</(?:a|div|td)>"#).unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap();
}

/// One blocking POST per query; the agent timeouts bound the wait.
pub struct DuckDuckGoSearch {
    http_client: ureq::Agent,
    endpoint: String,
}

impl DuckDuckGoSearch {
    pub fn new(config: &SearchConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5).min(timeout))
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            http_client,
            endpoint: config.endpoint.clone(),
        }
    }

    fn describe_failure(error: ureq::Error) -> Error {
        match error {
            ureq::Error::Status(code, response) => {
                Error::Transport(format!("HTTP {} {}", code, response.status_text()))
            }
            ureq::Error::Transport(transport) => Error::Transport(transport.to_string()),
        }
    }
}

impl SearchProvider for DuckDuckGoSearch {
    fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, Error> {
        debug!("POST {} q={:?}", self.endpoint, query);
        let page = self
            .http_client
            .post(&self.endpoint)
            .send_form(&[("q", query), ("b", ""), ("kl", "wt-wt")])
            .map_err(Self::describe_failure)?
            .into_string()
            .map_err(|err| Error::Transport(format!("Unreadable response: {}", err)))?;

        let hits = parse_results_page(&page, max_results);
        if hits.is_empty() && !page.contains("result__a") {
            warn!("Search page had no result markup; the endpoint layout may have changed");
        }
        Ok(hits)
    }
}

/// Pull title, link and snippet out of a DuckDuckGo HTML result page.
pub(crate) fn parse_results_page(page: &str, max_results: usize) -> Vec<SearchHit> {
    let links: Vec<_> = RESULT_LINK.captures_iter(page).collect();
    let mut hits = Vec::new();

    for (index, link) in links.iter().enumerate() {
        if hits.len() >= max_results {
            break;
        }
        let href = decode_redirect(&link[1]);
        // Sponsored results go through an ad redirect.
        if href.contains("duckduckgo.com/y.js") {
            continue;
        }

        let Some(whole) = link.get(0) else {
            continue;
        };
        let next_start = links
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(page.len(), |m| m.start());
        let body = RESULT_SNIPPET
            .captures(&page[whole.end()..next_start])
            .map(|snippet| clean_text(&snippet[1]))
            .unwrap_or_default();

        hits.push(SearchHit {
            title: clean_text(&link[2]),
            href,
            body,
        });
    }

    hits
}

/// Result links point at `//duckduckgo.com/l/?uddg=<encoded target>&...`.
fn decode_redirect(href: &str) -> String {
    let href = decode_entities(href);
    if let Some(start) = href.find("uddg=") {
        let encoded = href[start + 5..].split('&').next().unwrap_or_default();
        if let Ok(decoded) = urlencoding::decode(encoded) {
            return decoded.into_owned();
        }
    }
    match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href,
    }
}

fn clean_text(html: &str) -> String {
    let text = TAG.replace_all(html, "");
    decode_entities(text.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
