use clap::Parser;
use dotenv::dotenv;
use enhanced_chatbot::cli::Args;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = enhanced_chatbot::run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
