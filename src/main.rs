use std::{
    env,
    io::{
        self,
        BufRead,
        Write,
    },
    process,
    sync::Arc,
};

use kanfuda::{
    core::models::DEFAULT_CARD_COUNT,
    session::{
        Advance,
        ReviewSession,
        SessionLoader,
        SessionResult,
    },
    transport::{
        ResultsParams,
        ReviewParams,
    },
    Difficulty,
    KanfudaError,
    KanjiApiClient,
    StudyMode,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(error) = run() {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}

fn run() -> Result<(), KanfudaError> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage();
        process::exit(2);
    }

    // The argv boundary is the same string boundary a navigation layer
    // would cross, so it goes through the transport params.
    let params = ReviewParams {
        mode: args[1].clone(),
        difficulty: args[2].clone(),
        count: args.get(3).cloned().unwrap_or_else(|| DEFAULT_CARD_COUNT.to_string()),
    };
    let mut config = params.to_config()?;

    let client = Arc::new(KanjiApiClient::new()?);
    let mut loader = SessionLoader::new()?;

    loop {
        println!("Loading kanji...");
        loader.begin(client.clone(), config);

        let session = match loader.wait() {
            Some(Ok(session)) => session,
            Some(Err(error)) => {
                eprintln!("Failed to load kanji: {error}");
                if ask_yes_no("Retry?")? {
                    continue;
                }
                return Ok(());
            }
            None => return Ok(()),
        };

        let result = run_review(session)?;
        show_results(&result)?;

        if !ask_yes_no("Review again?")? {
            return Ok(());
        }
        config = result.review_again();
    }
}

fn run_review(mut session: ReviewSession) -> Result<SessionResult, KanfudaError> {
    let config = *session.config();
    println!();
    println!("Kanji Review ({} - {})", config.mode, config.difficulty.label());

    loop {
        let kanji = match session.current() {
            Some(entry) => entry.kanji.clone(),
            // Cannot happen: the session is non-empty and the loop returns
            // the moment it finishes.
            None => return Err(KanfudaError::EmptySession),
        };

        println!();
        println!("[{}]", session.progress_text());
        println!();
        println!("    {}", kanji.character);
        println!();

        let known = ask_yes_no("Do you know this kanji?")?;
        session.grade(known)?;

        println!("  On: {}", kanji.on_readings_text());
        println!("  Kun: {}", kanji.kun_readings_text());
        println!("  {}", kanji.meanings_text());
        println!("  Stroke count: {}", kanji.stroke_count);

        let last = session.position() + 1 == session.total();
        wait_for_enter(if last { "Finish" } else { "Next Kanji" })?;

        match session.advance()? {
            Advance::Next => {}
            Advance::Finished(result) => return Ok(result),
        }
    }
}

fn show_results(result: &SessionResult) -> Result<(), KanfudaError> {
    // Round-trip through the results params, exactly what a navigation
    // layer would carry between screens.
    let params = ResultsParams::from_result(result)?;
    let (correct, total) = params.counts();

    println!();
    println!("Review Complete!");
    println!();
    println!("  {}%", params.score_percent());
    println!("  {correct} / {total} kanji");
    println!();
    println!("Reviewed Kanji:");
    for card in params.reviewed() {
        let mark = if card.is_correct { "o" } else { "x" };
        println!("  {} {}  {}", mark, card.kanji.character, card.kanji.meanings_text());
    }
    println!();

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: kanfuda <mode> <difficulty> [count]");
    eprintln!();
    eprintln!("Modes and difficulties:");
    for mode in StudyMode::ALL {
        let tokens: Vec<String> =
            Difficulty::options(mode).iter().map(Difficulty::token).collect();
        eprintln!("  {:<10} {}", mode.as_str(), tokens.join(", "));
    }
    eprintln!();
    eprintln!("Count: 5-50 in steps of 5 (default {DEFAULT_CARD_COUNT})");
}

fn ask_yes_no(question: &str) -> Result<bool, KanfudaError> {
    loop {
        match prompt(&format!("{question} [y/n] "))?.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn wait_for_enter(action: &str) -> Result<(), KanfudaError> {
    prompt(&format!("[Enter] {action} "))?;
    Ok(())
}

fn prompt(message: &str) -> Result<String, KanfudaError> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
