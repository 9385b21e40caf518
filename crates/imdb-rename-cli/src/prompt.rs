use colored::*;
use imdb_rename_core::{Confirmation, Prompter};
use std::io::{self, Write};

/// Yes/no questions on stdin. Empty input takes the default; anything other
/// than y/n asks again.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: Confirmation) -> io::Result<Confirmation> {
        let mut input = String::new();
        let hint = match default {
            Confirmation::Confirmed => "[Y/n]",
            Confirmation::Declined => "[y/N]",
        };

        loop {
            input.clear();

            print!("{} {} ", message.yellow(), hint);
            io::stdout().flush()?;

            if io::stdin().read_line(&mut input)? == 0 {
                println!();
                return Ok(default);
            }

            match parse_answer(&input) {
                Some(answer) => return Ok(answer),
                None if input.trim().is_empty() => return Ok(default),
                None => continue,
            }
        }
    }
}

fn parse_answer(input: &str) -> Option<Confirmation> {
    match input.trim().to_uppercase().as_str() {
        "Y" | "YES" => Some(Confirmation::Confirmed),
        "N" | "NO" => Some(Confirmation::Declined),
        _ => None,
    }
}
