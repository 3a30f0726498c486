use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use restynet::{
    html_handler, passthrough, resource, responses, MethodDispatcher, Request, Resource,
    RouteNode, Router, Server, ServerConfig, VerbTable,
};

#[derive(Debug, Parser)]
#[command(name = "restynet", about = "Serve the demo resource tree")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

struct Cat;

impl Resource for Cat {
    fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
        verbs.insert("GET", html_handler(|req: &Request| format!("get cat {}!", req.path)));
        verbs.insert("PUT", html_handler(|req: &Request| format!("put cat {}!", req.path)));
    }
}

fn routes() -> Router {
    let index = MethodDispatcher::new().get(html_handler(|_req: &Request| "index!".to_string()));
    let cats = MethodDispatcher::new()
        .get(html_handler(|_req: &Request| "collection of cats!".to_string()));
    let dog = MethodDispatcher::new().get(html_handler(|_req: &Request| "get dog!".to_string()));
    let fur = MethodDispatcher::new()
        .get(passthrough(responses::ok()))
        .post(passthrough(responses::ok()));

    Router::new(
        RouteNode::branch()
            .with_handler(index)
            .child(
                "cats",
                RouteNode::branch()
                    .with_handler(cats)
                    .wildcard(RouteNode::leaf(resource(Cat))),
            )
            .child(
                "dogs",
                RouteNode::branch().wildcard(
                    RouteNode::branch()
                        .with_handler(dog)
                        .child("fur", RouteNode::leaf(fur)),
                ),
            ),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    femme::with_level(config.log_level());

    async_std::task::block_on(serve(config))?;

    Ok(())
}

async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let server = Server::bind(config, routes()).await?;
    server.run().await
}
