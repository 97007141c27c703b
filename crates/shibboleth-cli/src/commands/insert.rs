//! Add words to the vocabulary.

use anyhow::{bail, Result};
use colored::Colorize;

use shibboleth_engine::prelude::{AffinityStore, Word};

use super::open_session;

pub fn run(words: &[String]) -> Result<()> {
    let mut session = open_session()?;

    // vocabulary edits are frozen while a riddle is outstanding
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
        if session.insert_vocabulary(word)? {
            println!("  {} {}", "✓".green(), raw.to_lowercase());
        } else {
            println!("  {} {} already present", "•".yellow(), raw.to_lowercase());
        }
    }

    println!();
    println!(
        "Vocabulary now holds {} words.",
        session.store().word_count().to_string().cyan()
    );

    Ok(())
}
