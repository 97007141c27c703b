//! Issue a new riddle.

use anyhow::{bail, Result};
use colored::Colorize;

use shibboleth_engine::prelude::Error;

use super::open_session;

pub fn run() -> Result<()> {
    let mut session = open_session()?;

    let challenge = match session.issue_challenge() {
        Ok(challenge) => challenge,
        Err(Error::EmptyVocabulary) => {
            bail!(
                "The vocabulary is empty. Run {} first.",
                "shibboleth insert".cyan()
            );
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", "Riddle".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    for word in challenge.words() {
        println!("  {}", word.as_str().cyan());
    }
    println!("{}", "═".repeat(40).dimmed());
    println!(
        "Answer with a related word: {}",
        "shibboleth respond <word>".cyan()
    );

    Ok(())
}
