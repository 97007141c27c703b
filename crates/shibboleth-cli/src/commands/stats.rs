//! Show vocabulary and session statistics.

use anyhow::Result;
use colored::Colorize;

use shibboleth_engine::prelude::{AffinityStore, Protocol, SamplingPolicy, Session};

use crate::config::{data_dir, Config};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let session = Session::open(data_dir()?, config.session_config())?;
    let store = session.store();

    let words = store.words();
    let word_count = words.len();
    let edge_count = word_count * word_count.saturating_sub(1) / 2;

    // each undirected edge shows up twice in the neighbor lists
    let mut total_weight = 0.0;
    let mut min_weight = f64::INFINITY;
    let mut max_weight = f64::NEG_INFINITY;
    for word in &words {
        for (_, weight) in store.neighbors(word) {
            total_weight += weight;
            min_weight = min_weight.min(weight);
            max_weight = max_weight.max(weight);
        }
    }
    let avg_weight = if edge_count > 0 {
        total_weight / (edge_count * 2) as f64
    } else {
        0.0
    };

    println!("{}", "Shibboleth Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Vocabulary".blue().bold());
    println!("  Words:             {}", word_count.to_string().cyan());
    println!("  Affinity edges:    {}", edge_count.to_string().cyan());
    if edge_count > 0 {
        println!("  Avg weight:        {:.4}", avg_weight);
        println!("  Weight range:      [{:.1}, {:.1}]", min_weight, max_weight);
    }
    println!();

    println!("{}", "Judge".blue().bold());
    println!("  Sampling policy:   {}", policy_name(config.judge.policy).cyan());
    println!("  Protocol:          {}", protocol_name(config.judge.protocol).cyan());
    if config.judge.protocol == Protocol::Batched {
        println!(
            "  Batch round:       {}",
            session.batch_state().round.to_string().cyan()
        );
    }
    println!();

    println!("{}", "Session".blue().bold());
    match session.active_challenge() {
        Some(challenge) => println!("  Outstanding riddle: {}", challenge.to_string().cyan()),
        None => println!("  Outstanding riddle: {}", "none".dimmed()),
    }
    println!(
        "  Deferred responses: {}",
        session.ledger().len()?.to_string().cyan()
    );

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}

fn policy_name(policy: SamplingPolicy) -> &'static str {
    match policy {
        SamplingPolicy::Dense => "dense",
        SamplingPolicy::Random => "random",
    }
}

fn protocol_name(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Immediate => "immediate",
        Protocol::Batched => "batched",
    }
}
