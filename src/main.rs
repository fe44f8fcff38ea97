use dotenvy::dotenv;

mod app;
mod cli;
mod configuration;
mod context;
mod db;
mod model;
mod rest;
mod service;
mod startup;
mod tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    app::run().await
}
