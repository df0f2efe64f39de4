//! Headless mode for the debate arena.
//!
//! A line-oriented interface for scripted runs and automated testing:
//! the first input line (or `--statement`) opens the session, every
//! following line is an argument, and `#` lines are commands.

use arena_core::{DebateOutcome, HeadlessMatch, MatchError, Phase, SessionError};
use argubot::Argubot;
use std::io::{self, BufRead, Write};

/// Options parsed from the command line.
#[derive(Debug, Default)]
pub struct HeadlessOptions {
    pub url: Option<String>,
    pub statement: Option<String>,
}

/// Run a debate over stdin/stdout.
pub async fn run_headless(options: HeadlessOptions) -> Result<(), MatchError> {
    let client = match options.url {
        Some(url) => Argubot::new(url),
        None => Argubot::from_env(),
    };

    println!("=== Sir Interruptsalot (headless) ===");
    println!("Arena: {}", client.base_url());

    match client.health().await {
        Ok(health) if health.is_healthy() => println!("Service: {}", health.service),
        Ok(health) => println!("[WARN] Service reports status: {}", health.status),
        Err(e) => println!("[WARN] Health probe failed: {e}"),
    }

    println!();
    println!("Commands:");
    println!("  #end    - End the debate and fetch the report");
    println!("  #status - Show scores and time remaining");
    println!("  #quit   - Exit without a report");
    println!("  #help   - Show this help");
    println!();

    let mut debate = HeadlessMatch::new(client);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    // Opening statement: flag or first input line.
    let statement = match options.statement {
        Some(statement) => statement,
        None => {
            println!("Your opening statement:");
            match lines.next() {
                Some(Ok(line)) if !line.trim().is_empty() => line,
                _ => {
                    println!("No statement, no argument. Goodbye!");
                    return Ok(());
                }
            }
        }
    };

    print!("[CONNECTING]");
    stdout.flush().ok();
    match debate.open(statement.trim()).await {
        Ok(rebuttal) => {
            print!("\r            \r");
            print_rebuttal(&rebuttal.display_text(), &rebuttal.sources);
            print_score(&debate);
        }
        Err(e) => {
            print!("\r            \r");
            println!("[ERROR] Could not start the session: {e}");
            return Err(e);
        }
    }

    println!("Argue back (one line at a time):");
    println!();

    for line in lines {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            match command.split_whitespace().next() {
                Some("quit") | Some("exit") => {
                    println!("Walking away mid-argument. Bold.");
                    return Ok(());
                }
                Some("end") => {
                    finish_and_report(&mut debate).await;
                    return Ok(());
                }
                Some("status") => {
                    print_score(&debate);
                    println!("[TIME] {} seconds remaining", debate.time_remaining());
                }
                Some("help") => {
                    println!("[HELP]");
                    println!("  #end    - End the debate and fetch the report");
                    println!("  #status - Show scores and time remaining");
                    println!("  #quit   - Exit without a report");
                    println!("  (anything else is sent as your next argument)");
                }
                _ => println!("[ERROR] Unknown command. Type #help for help."),
            }
            stdout.flush().ok();
            continue;
        }

        // Clock may have run out while the player was typing.
        if debate.poll() == Phase::Overtime {
            println!("[TIME] The clock ran out while you were typing!");
            finish_and_report(&mut debate).await;
            return Ok(());
        }

        print!("[THINKING]");
        stdout.flush().ok();

        match debate.argue(line).await {
            Ok(rebuttal) => {
                print!("\r          \r");
                print_rebuttal(&rebuttal.display_text(), &rebuttal.sources);
                print_score(&debate);
            }
            Err(MatchError::Session(SessionError::Ended)) => {
                print!("\r          \r");
                finish_and_report(&mut debate).await;
                return Ok(());
            }
            Err(e) => {
                // State is already reverted; the argument can be retyped.
                print!("\r          \r");
                println!("[ERROR] {e}");
            }
        }

        if debate.phase() == Phase::Overtime {
            finish_and_report(&mut debate).await;
            return Ok(());
        }
    }

    Ok(())
}

async fn finish_and_report(debate: &mut HeadlessMatch) {
    println!("[REPORT] Fetching your personality report...");
    match debate.finish().await {
        Ok(outcome) => print_outcome(outcome),
        Err(e) => println!("[ERROR] Could not fetch the report: {e}"),
    }
}

fn print_rebuttal(text: &str, sources: &[argubot::Source]) {
    println!("[BOT] {text}");
    for source in sources {
        if source.title.is_empty() {
            println!("      └ {}", source.link);
        } else {
            println!("      └ {} — {}", source.title, source.link);
        }
    }
    println!();
}

fn print_score(debate: &HeadlessMatch) {
    let scores = debate.scores();
    println!("[SCORE] you {} - {} bot", scores.player, scores.bot);
    if let Some(status) = debate.session().latest_status() {
        println!("[STATUS] {status}");
    }
    println!();
}

fn print_outcome(outcome: &DebateOutcome) {
    let report = &outcome.report;

    println!();
    println!("=== DEBATE COMPLETE ===");
    println!(
        "Final score: you {} - {} bot",
        outcome.scores.player, outcome.scores.bot
    );

    if let Some(persona) = &report.persona {
        println!();
        println!("Arguing persona: \"{persona}\"");
    }
    print_section("STYLE BREAKDOWN", &report.style_breakdown);
    print_section("STRONGEST TRAITS", &report.strongest_traits);
    print_section("WEAKEST TRAITS", &report.weakest_traits);
    if let Some(summary) = &report.summary {
        println!();
        println!("SUMMARY");
        println!("  {summary}");
    }
    if !report.scores.is_empty() {
        println!();
        println!("SCORES");
        for score in &report.scores {
            println!("  {:<28} {:>3}/{}", score.label, score.value, score.max);
        }
    }
    if let Some(verdict) = &report.verdict {
        println!();
        println!("FINAL VERDICT");
        println!("  {verdict}");
    }
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{title}");
    for item in items {
        println!("  • {item}");
    }
}
