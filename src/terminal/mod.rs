use log::error;
use std::io::{ self, Write };
use tokio::io::{ AsyncBufReadExt, BufReader };

use crate::agent::ChatBot;

const FAREWELL: &str = "Goodbye!";

fn print_banner() {
    println!("Enhanced Chatbot - Type 'quit' to exit");
    println!("{}", "=".repeat(60));
    println!("Commands:");
    println!("  /search <query> - Search the web for real-time information");
    println!("  /read <filename> - Read and analyze files");
    println!("  /files - List available files");
    println!("Conversation memory persists across sessions.");
    println!("{}", "=".repeat(60));
}

fn is_exit_word(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye")
}

/// Interactive terminal loop. Exits on `quit`/`exit`/`bye`, end of input,
/// or Ctrl-C.
pub async fn run(agent: &mut ChatBot) {
    print_banner();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nYou: ");
        let _ = io::stdout().flush();

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", FAREWELL);
                return;
            }
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                let input = line.trim();
                if is_exit_word(input) {
                    println!("{}", FAREWELL);
                    return;
                }
                if input.is_empty() {
                    println!("Please enter a message.");
                    continue;
                }

                print!("Bot: ");
                let _ = io::stdout().flush();
                let response = agent.get_response(input).await;
                println!("{}", response);
            }
            Ok(None) => {
                println!("{}", FAREWELL);
                return;
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                return;
            }
        }
    }
}
