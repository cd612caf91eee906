//! vidgen - batch video-prompt generator over a rotating Gemini key pool.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use vidgen::cli::{handle_keys_action, Args, Command, ModeArg, NicheArg, PlatformArg, RatioArg};
use vidgen::collector::BatchResult;
use vidgen::config::Config;
use vidgen::executor::GenerationExecutor;
use vidgen::gemini::{GeminiClient, GEMINI_API_BASE_URL, GEMINI_API_KEY_ENV};
use vidgen::keys::{
    extract_keys, mask_key, KeyHistory, KeyValidator, Session, ValidationOutcome,
};
use vidgen::planner::{self, BatchRequest, Mode};

fn load_env() {
    // Load .env file, don't override existing env vars
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

/// Gather raw key material from flags, file, and environment; fall back to
/// reading stdin when none of those yielded anything.
fn collect_raw_keys(keys: Option<String>, keys_file: Option<PathBuf>) -> String {
    let mut raw = String::new();

    if let Some(keys) = keys {
        raw.push_str(&keys);
        raw.push('\n');
    }

    if let Some(path) = keys_file {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                raw.push_str(&content);
                raw.push('\n');
            }
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
        raw.push_str(&key);
        raw.push('\n');
    }

    if raw.trim().is_empty() {
        eprintln!("Paste API keys (comma- or newline-separated), then Ctrl-D:");
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        }
        raw = buf;
    }

    raw
}

fn build_client(config: &Config) -> GeminiClient {
    match GeminiClient::with_timeouts(
        GEMINI_API_BASE_URL.to_string(),
        Duration::from_secs(config.api.timeout_secs),
        Duration::from_secs(config.api.connect_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Validate every candidate key and admit the live ones into the pool.
/// Returns (live, total).
async fn validate_into_pool(
    client: &GeminiClient,
    session: &mut Session,
    raw: &str,
    save: bool,
) -> (usize, usize) {
    let candidates = extract_keys(raw);
    if candidates.is_empty() {
        eprintln!("No usable keys in input.");
        std::process::exit(1);
    }

    let validator = KeyValidator::new(client);
    let mut live = 0;

    for (i, key) in candidates.iter().enumerate() {
        print!("[{}/{}] {} ... ", i + 1, candidates.len(), mask_key(key));
        let _ = std::io::stdout().flush();

        match validator.validate(key).await {
            ValidationOutcome::Live { model } => {
                println!("live ({})", model);
                if session.pool.admit(key.clone(), model.clone()) {
                    live += 1;
                }
                if save {
                    if let Err(e) = session.history.record(key, &model) {
                        log::warn!("could not record key in history: {}", e);
                    }
                }
            }
            ValidationOutcome::Invalid { reason } => {
                println!("{}", reason);
            }
        }
    }

    (live, candidates.len())
}

async fn run_validate(
    config: &Config,
    history: KeyHistory,
    keys: Option<String>,
    keys_file: Option<PathBuf>,
    no_save: bool,
) {
    let client = build_client(config);
    let mut session = Session::new(history);
    let raw = collect_raw_keys(keys, keys_file);

    let (live, total) = validate_into_pool(&client, &mut session, &raw, !no_save).await;
    println!();
    println!("{} of {} keys live.", live, total);

    if live == 0 {
        std::process::exit(1);
    }
}

/// Options for one generate run, as parsed from the CLI.
struct GenerateOpts {
    topic: String,
    platform: PlatformArg,
    mode: ModeArg,
    niche: NicheArg,
    angle: Option<String>,
    quantity: Option<u8>,
    ratio: RatioArg,
    i2v: bool,
    no_negative: bool,
    keys: Option<String>,
    keys_file: Option<PathBuf>,
    from_history: bool,
    output: Option<PathBuf>,
}

async fn run_generate(config: &Config, history: KeyHistory, opts: GenerateOpts) {
    let client = build_client(config);
    let mut session = Session::new(history);

    if opts.from_history {
        let entries = match session.history.load() {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        for (key, entry) in entries {
            session.pool.admit(key, entry.model);
        }
        if session.pool.is_empty() {
            eprintln!("Key history is empty. Run 'vidgen validate' first.");
            std::process::exit(1);
        }
        println!("Using {} keys from history.", session.pool.len());
    } else {
        let raw = collect_raw_keys(opts.keys, opts.keys_file);
        let (live, total) = validate_into_pool(&client, &mut session, &raw, true).await;
        if live == 0 {
            eprintln!("None of the {} keys are usable.", total);
            std::process::exit(1);
        }
    }

    let mode = match opts.mode {
        ModeArg::Creative => Mode::Creative {
            niche: opts.niche.into(),
        },
        ModeArg::Affiliate => match opts.angle {
            Some(angle) => Mode::Affiliate { angle },
            None => {
                eprintln!("Error: affiliate mode requires --angle.");
                std::process::exit(1);
            }
        },
    };

    let use_negative = if opts.no_negative {
        false
    } else {
        config.generate.negative_prompt
    };

    let request = BatchRequest {
        mode,
        subject: opts.topic.clone(),
        platform: opts.platform.into(),
        quantity: opts
            .quantity
            .map(usize::from)
            .unwrap_or(config.generate.quantity),
        aspect_ratio: opts.ratio.into(),
        i2v: opts.i2v,
        use_negative,
    };

    let tasks = planner::plan(&request);
    let executor = GenerationExecutor::with_attempt_delay(Duration::from_millis(
        config.generate.attempt_delay_ms,
    ));

    let results = match executor.run(&tasks, &session.pool, &client).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let batch = BatchResult::from_results(request.platform, opts.topic, results);

    if batch.is_total_failure() {
        eprintln!(
            "No prompts were generated ({} tasks, {} keys all failed).",
            batch.requested_count(),
            session.pool.len()
        );
        std::process::exit(1);
    }

    match opts.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, batch.export_text()) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!(
                "Wrote {} ({} of {} prompts).",
                path.display(),
                batch.success_count(),
                batch.requested_count()
            );
        }
        None => {
            println!("{}", batch.export_text());
            eprintln!(
                "Generated {} of {} prompts.",
                batch.success_count(),
                batch.requested_count()
            );
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    load_env();
    env_logger::init();

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let history = KeyHistory::with_default_path();

    match args.command {
        Command::Validate {
            keys,
            keys_file,
            no_save,
        } => {
            run_validate(&config, history, keys, keys_file, no_save).await;
        }
        Command::Generate {
            topic,
            platform,
            mode,
            niche,
            angle,
            quantity,
            ratio,
            i2v,
            no_negative,
            keys,
            keys_file,
            from_history,
            output,
        } => {
            run_generate(
                &config,
                history,
                GenerateOpts {
                    topic,
                    platform,
                    mode,
                    niche,
                    angle,
                    quantity,
                    ratio,
                    i2v,
                    no_negative,
                    keys,
                    keys_file,
                    from_history,
                    output,
                },
            )
            .await;
        }
        Command::Keys { action } => {
            handle_keys_action(action, &history);
        }
    }
}
