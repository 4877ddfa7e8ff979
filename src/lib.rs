pub mod agent;
pub mod cli;
pub mod llm;
pub mod memory;
pub mod models;
pub mod search;
pub mod server;
pub mod terminal;
pub mod tools;

use agent::ChatBot;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Mode: {}", args.mode);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Memory Path: {}", args.memory_path);
    info!("Search Base URL: {}", args.search_base_url);
    if args.mode.eq_ignore_ascii_case("web") {
        info!("Server Address: {}", args.server_addr);
    }
    info!("-------------------------");

    let mut bot = ChatBot::new(&args)?;

    match args.mode.to_lowercase().as_str() {
        "terminal" => {
            terminal::run(&mut bot).await;
            Ok(())
        }
        "web" => {
            let agent = Arc::new(Mutex::new(bot));
            let server = Server::new(args.server_addr.clone(), agent);
            server.run().await
        }
        other => Err(format!("Unsupported mode: {} (expected terminal or web)", other).into()),
    }
}
