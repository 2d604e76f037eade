//! chatcast terminal client
//!
//! Reads lines from stdin and publishes each one; prints every broadcast
//! message received on the stream.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use chatcast_client::client::timestamp_now;
use chatcast_client::{generate_user, render_line, Client};
use chatcast_core::error::Result;
use chatcast_core::Message;

#[derive(Debug, Parser)]
#[command(name = "chatcast", about = "Broadcast chat client")]
struct Args {
    /// Gateway address.
    #[arg(long, default_value = "127.0.0.1:50051")]
    server: String,

    /// Display name.
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let user = generate_user(&args.name, &timestamp_now());
    let client = Client::new(args.server);
    let mut stream = client.connect(&user).await?;

    let local = user.clone();
    let mut printer = tokio::spawn(async move {
        while let Some(next) = stream.recv().await {
            match next {
                Ok(msg) => println!("{}", render_line(&local, &msg)),
                Err(e) => {
                    tracing::warn!(error = %e, "stream error");
                    break;
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = &mut printer => {
                eprintln!("stream closed by server");
                break;
            }
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break; };
                let content = line.trim();
                if content.is_empty() {
                    continue;
                }
                let msg = Message::new(user.clone(), content, timestamp_now());
                if let Err(e) = client.publish(&msg).await {
                    eprintln!("Error Sending Message: {e}");
                }
            }
        }
    }
    Ok(())
}
