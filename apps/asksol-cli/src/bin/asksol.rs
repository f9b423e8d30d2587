use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use asksol_answer::{Assistant, Reply};
use asksol_core::config::{expand_path, Config, Settings};
use asksol_core::corpus::load_corpus;
use asksol_core::types::ScoredResult;
use asksol_retrieval::RetrieveParams;
use asksol_text::Thesaurus;

#[derive(Parser)]
#[command(name = "asksol", about = "Answer college questions from a Q&A corpus", version)]
struct Cli {
    /// Corpus file or directory (JSON / JSONL); overrides `data.corpus_path`
    #[arg(long, global = true, env = "ASKSOL_DATA")]
    data: Option<String>,

    /// Synonym thesaurus (JSON); enables query expansion
    #[arg(long, global = true)]
    thesaurus: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        question: String,
        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },
    /// List ranked matches; falls back to fuzzy matching when none pass the threshold
    Search { query: String },
    /// Interactive question loop
    Repl,
    /// Show corpus and index statistics
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "asksol=debug" } else { "asksol=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let (assistant, settings) = build_assistant(&cli)?;
    match cli.command {
        Command::Ask { question, json } => {
            let reply = assistant.ask(&question)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                print_reply(&reply);
            }
        }
        Command::Search { query } => search(&assistant, &settings, &query),
        Command::Repl => repl(&assistant)?,
        Command::Inspect => inspect(&assistant),
    }
    Ok(())
}

fn build_assistant(cli: &Cli) -> Result<(Assistant, Settings)> {
    let config = Config::load().context("loading configuration")?;
    let mut settings = config.settings()?;

    let corpus_path: PathBuf = expand_path(cli.data.as_deref().unwrap_or(&settings.data.corpus_path));
    let corpus = load_corpus(&corpus_path).with_context(|| format!("loading corpus from {}", corpus_path.display()))?;

    let thesaurus_path = cli.thesaurus.clone().or_else(|| settings.data.thesaurus_path.clone());
    let thesaurus = match thesaurus_path {
        Some(p) => {
            let path = expand_path(&p);
            let thesaurus = Thesaurus::from_path(&path).with_context(|| format!("loading thesaurus from {}", path.display()))?;
            info!(entries = thesaurus.len(), "thesaurus loaded");
            settings.retrieval.use_synonyms = true;
            Some(thesaurus)
        }
        None => None,
    };

    let assistant = Assistant::from_settings(corpus, &settings, thesaurus.as_ref())?;
    Ok((assistant, settings))
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.answer);
    println!("(confidence {}/10)", reply.confidence);
}

fn search(assistant: &Assistant, settings: &Settings, query: &str) {
    let retriever = assistant.retriever();
    let params = RetrieveParams::from_settings(&settings.retrieval);
    let retrieval = retriever.retrieve(query, &params);
    if retrieval.accepted.is_empty() {
        println!("no match above {:.2}, closest questions:", params.threshold);
        let fuzzy = retriever.fuzzy_fallback(query, settings.retrieval.fallback_top_k, params.dedupe_threshold);
        print_results(&fuzzy);
    } else {
        print_results(&retrieval.accepted);
    }
}

fn print_results(results: &[ScoredResult]) {
    for (i, r) in results.iter().enumerate() {
        println!("{}. [{:.3}] {}", i + 1, r.score, r.question);
        println!("   {}", r.answer);
    }
}

fn repl(assistant: &Assistant) -> Result<()> {
    println!("AskSol ({} questions loaded)", assistant.corpus().len());
    println!("  /stats  - corpus statistics");
    println!("  /quit   - exit");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("ask> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "/stats" | "/s" => inspect(assistant),
            "/quit" | "/q" | "quit" | "exit" => break,
            _ => match assistant.ask(input) {
                Ok(reply) => print_reply(&reply),
                Err(e) => println!("error: {e}"),
            },
        }
        println!();
    }
    Ok(())
}

fn inspect(assistant: &Assistant) {
    let retriever = assistant.retriever();
    println!("questions:  {}", retriever.len());
    println!("features:   {}", retriever.vocabulary_len());
    println!("synonyms:   {}", if retriever.expands_synonyms() { "on" } else { "off" });
    let courses = assistant.courses().names();
    println!("courses:    {}", courses.len());
    for name in courses {
        println!("  - {name}");
    }
}
