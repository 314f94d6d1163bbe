use anyhow::Result;
use clap::Parser;
use voyage_cli::VoyageClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "List routes known to the voyage server", long_about = None)]
struct Args {
    /// Voyage server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let routes = VoyageClient::new(args.url).list_routes().await?;

    println!("{:<4} {:<32} {:>9}", "ID", "NAME", "WAYPOINTS");
    for route in routes {
        println!("{:<4} {:<32} {:>9}", route.id, route.name, route.waypoint_count);
    }
    Ok(())
}
