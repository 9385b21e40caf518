use crate::candidate::Candidate;
use crate::search::SearchHit;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref IMDB_LINK: Regex = Regex::new(r"^.*\Wimdb\.com/title/(tt\d+)").unwrap();
    static ref IMDB_TITLE: Regex = Regex::new(r"^(.*) \((\d{4})\) - IMDb").unwrap();
}

/// Turn one hit into a candidate. Hits without both an IMDb title link and an
/// IMDb style page title are not film pages and yield `None`.
pub fn parse_hit(hit: &SearchHit) -> Option<Candidate> {
    let link = IMDB_LINK.captures(&hit.href)?;
    let heading = IMDB_TITLE.captures(&hit.title)?;

    let title = &heading[1];
    let overview = hit
        .body
        .strip_prefix(title)
        .and_then(|rest| rest.strip_prefix(": "))
        .unwrap_or(&hit.body);

    Some(Candidate::new(&link[1], title, &heading[2], &link[0], overview))
}

/// Parse hits in search order, silently dropping the ones that are not films.
pub fn parse_hits(hits: &[SearchHit]) -> Vec<Candidate> {
    hits.iter()
        .filter_map(|hit| {
            let parsed = parse_hit(hit);
            if parsed.is_none() {
                debug!("Dropping search hit {:?} ({})", hit.title, hit.href);
            }
            parsed
        })
        .collect()
}
