//! Submit a response to the outstanding riddle.

use anyhow::{bail, Result};
use colored::Colorize;

use shibboleth_engine::prelude::{Error, Judgement, Verdict};

use super::open_session;

pub fn run(word: &str, mode: Option<Verdict>) -> Result<()> {
    let mut session = open_session()?;

    let judgement = match session.judge_response(word, mode) {
        Ok(judgement) => judgement,
        Err(Error::NoActiveChallenge) => {
            bail!(
                "No outstanding riddle. Run {} first.",
                "shibboleth challenge".cyan()
            );
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", status_line(judgement));
    if judgement == Judgement::NeedAnotherResponse {
        println!(
            "Get the next riddle with {}.",
            "shibboleth challenge".cyan()
        );
    }

    Ok(())
}

fn status_line(judgement: Judgement) -> String {
    match judgement {
        Judgement::MalformedInput => "[ The response should not contain spaces ]"
            .yellow()
            .to_string(),
        Judgement::EmptyOrNonAlpha => {
            "[ The response should not be empty and should only contain ASCII a-z characters ]"
                .yellow()
                .to_string()
        }
        Judgement::ChallengeMember => "[ The word should not be presented in the riddle ]"
            .yellow()
            .to_string(),
        Judgement::NeedAnotherResponse => "[ Please solve one more riddle ]".yellow().to_string(),
        Judgement::Pass => "[ Pass ]".green().bold().to_string(),
        Judgement::Fail => "[ Fail ]".red().bold().to_string(),
    }
}
