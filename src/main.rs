use std::io::Write;

use clap::{Parser, Subcommand};
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use askyourstack::api::{self, AppState, SecurityConfig};
use askyourstack::client::RelayClient;
use askyourstack::config::AppConfig;
use askyourstack::consumer::{Conversation, Update};
use askyourstack::models::AskBody;
use askyourstack::prefs::Preferences;

#[derive(Parser)]
#[command(name = "ays")]
#[command(about = "Ask questions about your documentation stack")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },
    /// Ask a running server a question (interactive when no question is given)
    Ask {
        question: Option<String>,

        /// Documentation source id (repeatable). Defaults to the last selection.
        #[arg(short, long = "doc")]
        docs: Vec<String>,

        /// Personality id. Defaults to the last selection.
        #[arg(short, long)]
        personality: Option<String>,

        /// Extra directive id, e.g. `eli5` (repeatable)
        #[arg(short, long = "setting")]
        settings: Vec<String>,

        /// Database id
        #[arg(long)]
        database: Option<String>,
    },
    /// List the documentation sources and personalities a running server offers
    Catalog,
    /// Check server status
    Status,
}

/// Initialize tracing; logs go to stderr so answers on stdout stay clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "askyourstack=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(bind: &str, port: u16) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let security = SecurityConfig::from_config(&config);
    let app = api::create_router(AppState::from_config(&config), security);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port)).await?;
    tracing::info!("AskYourStack server listening on http://{}:{}", bind, port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn ask_one(
    client: &RelayClient,
    conversation: &mut Conversation,
    selection: &AskBody,
    question: String,
) -> anyhow::Result<()> {
    let body = AskBody {
        question,
        ..selection.clone()
    };

    let ticket = conversation.start();
    let mut events = client.ask(&body).await?;
    let mut stdout = std::io::stdout();

    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                if let Update::Fragment(text) = conversation.receive(ticket, &event.data) {
                    print!("{}", text);
                    stdout.flush()?;
                }
            }
            Err(e) => {
                println!();
                eprintln!("The answer was interrupted: {}", e);
                break;
            }
        }
    }
    conversation.close(ticket);
    println!();

    let records = conversation.answer().records().to_vec();
    if !records.is_empty() {
        let docs = client.docs_get(&records, body.database.as_deref()).await?;
        println!("\nI have used the following doc pages as context:");
        for doc in docs {
            println!("  - {} ({})", doc.title, doc.url);
        }
    }

    if let Some(epilog) = body.selected_personality().and_then(|d| d.epilog) {
        println!("\n{}", epilog);
    }
    Ok(())
}

async fn ask(
    question: Option<String>,
    docs: Vec<String>,
    personality: Option<String>,
    settings: Vec<String>,
    database: Option<String>,
) -> anyhow::Result<()> {
    let mut prefs = Preferences::default_path().map(Preferences::load);

    let docs = match (&prefs, docs.is_empty()) {
        (Some(prefs), true) => prefs.checked_docs(),
        _ => docs,
    };
    let saved = prefs
        .as_ref()
        .and_then(Preferences::personality)
        .unwrap_or_else(|| "default".to_string());

    // A personality picked through --setting wins over the saved one.
    let selection = AskBody {
        database,
        question: String::new(),
        checked_docs: docs,
        checked_settings: Some(settings),
        personality,
    }
    .or_personality(saved);

    if let Some(prefs) = prefs.as_mut() {
        prefs.set_checked_docs(&selection.checked_docs);
        if let Some(personality) = &selection.personality {
            prefs.set_personality(personality);
        }
        if let Err(e) = prefs.save() {
            tracing::warn!("Could not save preferences to {}: {}", prefs.path().display(), e);
        }
    }

    let client = RelayClient::from_env();
    let mut conversation = Conversation::new();

    match question {
        Some(question) => ask_one(&client, &mut conversation, &selection, question).await,
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            print!("> ");
            std::io::stdout().flush()?;
            while let Some(line) = lines.next_line().await? {
                let question = line.trim().to_string();
                if !question.is_empty() {
                    if let Err(e) = ask_one(&client, &mut conversation, &selection, question).await {
                        eprintln!("{}", e);
                    }
                }
                print!("> ");
                std::io::stdout().flush()?;
            }
            Ok(())
        }
    }
}

/// Print what the running server offers.
async fn print_catalog() -> anyhow::Result<()> {
    let catalog = RelayClient::from_env().catalog().await?;
    let text = |value: &serde_json::Value| value.as_str().unwrap_or_default().to_string();

    println!("Databases");
    for database in catalog["databases"].as_array().into_iter().flatten() {
        match database["recordCount"].as_u64() {
            Some(count) => println!("  {:<18} {} ({} pages)", text(&database["id"]), text(&database["name"]), count),
            None => println!("  {:<18} {}", text(&database["id"]), text(&database["name"])),
        }
    }

    for section in catalog["docSections"].as_array().into_iter().flatten() {
        println!("\n{}", text(&section["name"]));
        for doc in section["docs"].as_array().into_iter().flatten() {
            match doc["sampleQuestion"].as_str() {
                Some(sample) => println!("  {:<18} {:<14} e.g. \"{}\"", text(&doc["id"]), text(&doc["name"]), sample),
                None => println!("  {:<18} {}", text(&doc["id"]), text(&doc["name"])),
            }
        }
    }

    println!("\nDirectives");
    for directive in catalog["directives"].as_array().into_iter().flatten() {
        let kind = directive["group"].as_str().unwrap_or("setting");
        println!("  {:<18} {:<20} [{}]", text(&directive["id"]), text(&directive["display"]), kind);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port, bind }) => serve(&bind, port).await?,
        Some(Commands::Ask {
            question,
            docs,
            personality,
            settings,
            database,
        }) => ask(question, docs, personality, settings, database).await?,
        Some(Commands::Catalog) => print_catalog().await?,
        Some(Commands::Status) => {
            let status = RelayClient::from_env().health().await?;
            println!("Server status: {}", status["status"].as_str().unwrap_or("unknown"));
        }
        None => serve("127.0.0.1", 3000).await?,
    }

    Ok(())
}
