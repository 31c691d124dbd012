//! `langchain` binary: parse a demo subcommand, run its pipeline, print the result.

use clap::Parser;
use langchain::Value;
use langchain_cli::{
    build_chat_model, init_tracing, run_chat_repl, run_demo, ChatSession, Demo, Error, RunConfig,
    RunOptions,
};

#[derive(Parser, Debug)]
#[command(name = "langchain")]
#[command(about = "Run prompt → model → parser pipelines against a chat model")]
struct Args {
    #[command(subcommand)]
    demo: Demo,

    /// Use the scripted mock model (no API key, no network).
    #[arg(long, global = true)]
    mock: bool,

    /// Model name (overrides OPENAI_MODEL).
    #[arg(long, global = true, value_name = "NAME")]
    model: Option<String>,

    /// Sampling temperature 0–2 (overrides OPENAI_TEMPERATURE).
    #[arg(long, global = true)]
    temperature: Option<f32>,

    /// Per-call timeout in seconds (overrides OPENAI_TIMEOUT_SECS).
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Show debug logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the pipeline tree before running.
    #[arg(long, global = true)]
    graph: bool,
}

impl Args {
    fn options(&self) -> RunOptions {
        RunOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
            mock: self.mock,
            verbose: self.verbose,
        }
    }
}

fn print_value(value: &Value) {
    match value {
        Value::String(_) | Value::Message(_) => println!("{}", value),
        other => match serde_json::to_string_pretty(&other.to_json()) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", other),
        },
    }
}

fn load_config(args: &Args) -> Result<RunConfig, Error> {
    let mut config = RunConfig::from_env()?;
    config.apply_options(&args.options());
    Ok(config)
}

async fn run(args: &Args, config: &RunConfig) -> Result<(), Error> {
    if let Demo::Chat { system } = &args.demo {
        let model = build_chat_model(config, Vec::new(), || args.demo.mock_model())?;
        let mut session = ChatSession::new(model, system)?;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_chat_repl(&mut session, stdin, &mut std::io::stdout()).await?;
        for message in session.history() {
            println!("[{}] {}", message.role(), message.content());
        }
        return Ok(());
    }

    let out = run_demo(&args.demo, config, args.graph).await?;
    if let Some(graph) = &out.graph {
        println!("{}", graph);
        println!("---");
    }
    print_value(&out.value);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("warning: logging disabled: {}", e);
    }

    if let Err(e) = run(&args, &config).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
