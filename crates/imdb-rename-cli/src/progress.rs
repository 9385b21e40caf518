use colored::*;
use console::{measure_text_width, truncate_str, Term};
use imdb_rename_core::{Candidate, ResolutionReporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const HEADERS: [&str; 4] = ["IMDb Key", "Title", "Year", "Overview"];
const COLUMN_GAP: usize = 2;

/// Spinner while the search runs, then a table of the candidates.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ResolutionReporter for CliReporter {
    fn on_search_start(&self, query: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(format!("Searching for {}", query.cyan()));
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_search_complete(&self, hits: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Search complete: {} results in {:.2}s",
            "✓".green(),
            hits,
            duration_secs
        );
    }

    fn on_search_failed(&self) {
        self.finish_bar();
    }

    fn on_candidates(&self, candidates: &[Candidate]) {
        let title = if candidates.len() > 1 {
            "Multiple IMDb Results".red().bold()
        } else {
            "IMDb Result".green().bold()
        };
        let width = Term::stdout().size_checked().map(|(_, cols)| cols as usize);
        println!();
        println!("{}", title);
        for line in render_table(candidates, width) {
            println!("{}", line);
        }
        println!();
    }
}

/// Plain-text table rows, the overview column clipped to `width` if known.
fn render_table(candidates: &[Candidate], width: Option<usize>) -> Vec<String> {
    let rows: Vec<[&str; 4]> = candidates
        .iter()
        .map(|c| [c.key.as_str(), c.title.as_str(), c.year.as_str(), c.overview.as_str()])
        .collect();

    let mut widths = [0usize; 3];
    for (i, w) in widths.iter_mut().enumerate() {
        *w = rows
            .iter()
            .map(|row| measure_text_width(row[i]))
            .chain(std::iter::once(HEADERS[i].len()))
            .max()
            .unwrap_or(0);
    }
    let fixed: usize = widths.iter().sum::<usize>() + COLUMN_GAP * 3;
    let overview_width = width.map(|w| w.saturating_sub(fixed).max(20));

    let format_row = |cells: [&str; 4]| {
        let overview = match overview_width {
            Some(max) => truncate_str(cells[3], max, "…").into_owned(),
            None => cells[3].to_string(),
        };
        format!(
            "{:<w0$}{gap}{:<w1$}{gap}{:<w2$}{gap}{}",
            cells[0],
            cells[1],
            cells[2],
            overview,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            gap = " ".repeat(COLUMN_GAP),
        )
        .trim_end()
        .to_string()
    };

    let mut lines = vec![format_row(HEADERS)];
    lines.push("─".repeat(fixed + overview_width.unwrap_or(HEADERS[3].len())));
    lines.extend(rows.into_iter().map(format_row));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let candidates = vec![
            Candidate::new("tt0113277", "Heat", "1995", "", "A group of thieves."),
            Candidate::new("tt0091183", "Heat", "1986", "", ""),
        ];
        let lines = render_table(&candidates, None);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "IMDb Key   Title  Year  Overview");
        assert_eq!(lines[2], "tt0113277  Heat   1995  A group of thieves.");
        assert_eq!(lines[3], "tt0091183  Heat   1986");
    }

    #[test]
    fn test_render_table_clips_overview() {
        let candidates = vec![Candidate::new(
            "tt1375666",
            "Inception",
            "2010",
            "",
            "A thief who steals corporate secrets through the use of dream-sharing technology.",
        )];
        let lines = render_table(&candidates, Some(60));
        assert!(measure_text_width(&lines[2]) <= 60);
        assert!(lines[2].ends_with('…'));
    }
}
