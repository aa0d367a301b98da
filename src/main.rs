use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use parley::config;
use parley::engine::ConversationEngine;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "A rule-based conversational backend with per-session memory")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Bearer token (required for non-loopback)
        #[arg(long, env = "PARLEY_TOKEN")]
        token: Option<String>,
    },

    /// Chat on the terminal, one message per line
    Chat {
        /// Session id to use (defaults to a fresh one)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Print the classifier output for a message as JSON
    Analyze {
        /// Message text
        text: String,
    },

    /// Show version and resolved configuration
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind, token } => {
            let mut config = config::load()?;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(bind) = bind {
                config.gateway.bind = bind;
            }
            parley::gateway::run(config, token).await
        }
        Commands::Chat { session } => {
            let config = config::load()?;
            let session = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            chat_loop(ConversationEngine::from_config(&config), &session).await
        }
        Commands::Analyze { text } => {
            let analysis = parley::nlp::analyze(&text);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }
        Commands::Status => {
            let config = config::load()?;
            println!("parley v{}", env!("CARGO_PKG_VERSION"));
            println!("generator: {}", config.generator.backend.as_str());
            println!("model: {}", config.generator.model);
            println!("history window: {}", config.engine.history_window);
            println!("rule order: {:?}", config.engine.rule_order);
            Ok(())
        }
    }
}

async fn chat_loop(engine: ConversationEngine, session: &str) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("session {session} (type 'exit' to quit)\n> ").as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if !line.is_empty() {
            let reply = engine.handle_message(session, line).await;
            let summary = format!(
                "{}\n  [{} · {} · {} entities · {}ms]\n",
                reply.reply,
                reply.intent,
                reply.sentiment,
                reply.entities.len(),
                reply.latency_ms
            );
            stdout.write_all(summary.as_bytes()).await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}
