//! Remove words from the vocabulary.

use anyhow::{bail, Result};
use colored::Colorize;

use shibboleth_engine::prelude::{AffinityStore, Word};

use super::open_session;

pub fn run(words: &[String]) -> Result<()> {
    let mut session = open_session()?;

    if session.active_challenge().is_some() {
        bail!(
            "A riddle is outstanding; answer it with {} before editing the vocabulary.",
            "shibboleth respond".cyan()
        );
    }

    for raw in words {
        let word = match Word::new(raw.to_lowercase()) {
            Ok(word) => word,
            Err(_) => {
                println!(
                    "  {} {} skipped (only ASCII a-z words are allowed)",
                    "✗".red(),
                    raw
                );
                continue;
            }
        };
        if session.remove_vocabulary(&word)? {
            println!("  {} {}", "✓".green(), raw.to_lowercase());
        } else {
            println!("  {} {} not in the vocabulary", "•".yellow(), raw.to_lowercase());
        }
    }

    println!();
    println!(
        "Vocabulary now holds {} words.",
        session.store().word_count().to_string().cyan()
    );

    Ok(())
}
