pub mod api;

use crate::agent::ChatBot;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Server {
    addr: String,
    agent: Arc<Mutex<ChatBot>>,
}

impl Server {
    pub fn new(addr: String, agent: Arc<Mutex<ChatBot>>) -> Self {
        Self { addr, agent }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.agent.clone()).await
    }
}
