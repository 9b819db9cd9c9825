use std::io::{self, Write};

use anyhow::Result;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use bookchat_core::{ChatClient, ChatSession, Config, SubmitOutcome, DEFAULT_BASE_URL};

/// The user-visible reply when the transport fails.
const FALLBACK_REPLY: &str = "Server error. Please try again later.";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Load config
    let config = Config::load().unwrap_or_else(|_| Config::new());
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let fallback_reply = config
        .fallback_reply
        .clone()
        .unwrap_or_else(|| FALLBACK_REPLY.to_string());

    let client = ChatClient::new(&base_url);
    let mut session = ChatSession::new(client, fallback_reply);

    println!("{}", "BookBot console".bold().blue());
    println!("Ask a question about books. Type 'exit' or 'quit' to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", "you>".bold().cyan());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        println!("{}", "BookBot is thinking...".dimmed());

        match session.submit(&line).await {
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Answered | SubmitOutcome::Failed => {
                if let Some(reply) = session.conversation().all().last() {
                    println!("{} {}\n", "bot>".bold().yellow(), reply.content);
                }
            }
        }
    }

    println!("{}", "Goodbye!".dimmed());
    Ok(())
}
