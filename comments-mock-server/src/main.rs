use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use comments_mock_server::MockServer;
use tokio::sync::Mutex;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Address to listen on
    #[structopt(short, long, env = "COMMENTS_LISTEN", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// JSON array of comments to serve, instead of generated ones
    #[structopt(long)]
    fixture: Option<PathBuf>,

    /// Number of comments to generate
    #[structopt(long, default_value = "500")]
    count: usize,

    /// Seed for comment generation
    #[structopt(long, default_value = "0")]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let server = match &opt.fixture {
        Some(path) => MockServer::from_fixture(path)?,
        None => MockServer::generate(opt.count, opt.seed),
    };
    let app = comments_mock_server::router(Arc::new(Mutex::new(server)));

    tracing::info!("listening on {}", opt.listen);
    axum::Server::bind(&opt.listen)
        .serve(app.into_make_service())
        .await
        .context("serving axum webserver")
}
