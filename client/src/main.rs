use clap::Parser;
use client::config::{ClientConfig, DEFAULT_NICKNAME, DEFAULT_SERVER_URL};
use client::input::Intent;
use client::network::Client;
use client::presentation::LogPresentation;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Websocket URL of the match server
    #[arg(short = 's', long, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Nickname to join with
    #[arg(short = 'n', long, default_value = DEFAULT_NICKNAME)]
    name: String,

    /// Report ready as soon as the join request is sent
    #[arg(long)]
    auto_ready: bool,
}

/// Reads intents from stdin, one per line, until EOF.
fn spawn_console(intent_tx: mpsc::UnboundedSender<Intent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match Intent::parse(&line) {
                    Ok(intent) => {
                        if intent_tx.send(intent).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("{}", e),
                },
                Ok(None) => break,
                Err(e) => {
                    warn!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let config = ClientConfig::new(args.server, args.name).with_auto_ready(args.auto_ready);

    info!("Starting client...");
    info!("Commands: join <name> | ready | move <x> <y> | run on|off | kill <id>");

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    spawn_console(intent_tx);

    let client = Client::connect(config, LogPresentation::new()).await?;
    let finished = client.run(intent_rx).await?;

    let session = finished.session();
    if !session.highscores().is_empty() {
        info!("Final scores:");
        for row in session.highscores() {
            info!("  {:>5}  {}", row.points, row.name);
        }
    }

    Ok(())
}
