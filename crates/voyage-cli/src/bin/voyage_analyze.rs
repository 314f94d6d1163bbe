use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use voyage_cli::{format_summary, AnalyzeBody, VoyageClient};
use voyage_core::{vessel_preset, LaycanWindow, VesselProfile};

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze a voyage on the voyage server", long_about = None)]
struct Args {
    /// Voyage server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Route identifier from the catalog
    #[arg(long, default_value = "1")]
    route: String,

    /// Vessel preset id (see /v1/vessels); explicit flags override it
    #[arg(long)]
    preset: Option<String>,

    /// Vessel name shown in the report
    #[arg(long)]
    vessel: Option<String>,

    /// Service speed through water in knots
    #[arg(long)]
    speed: Option<f64>,

    /// Fuel consumption at service speed, tons per day
    #[arg(long)]
    fuel_rate: Option<f64>,

    /// Fuel price per ton
    #[arg(long, default_value_t = 650.0)]
    fuel_price: f64,

    /// Laycan window start (RFC 3339)
    #[arg(long)]
    laycan_start: Option<DateTime<Utc>>,

    /// Laycan window end (RFC 3339)
    #[arg(long)]
    laycan_end: Option<DateTime<Utc>>,

    /// Request advisory insights
    #[arg(long)]
    insights: bool,

    /// Print the raw JSON response instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let laycan_window = match (args.laycan_start, args.laycan_end) {
        (None, None) => None,
        (start, end) => Some(LaycanWindow::new(start, end)?),
    };

    let mut vessel_specs = match &args.preset {
        Some(id) => vessel_preset(id)
            .with_context(|| format!("unknown vessel preset '{id}'"))?
            .profile(args.fuel_price),
        None => VesselProfile {
            fuel_price: args.fuel_price,
            ..VesselProfile::default()
        },
    };
    if let Some(name) = args.vessel {
        vessel_specs.vessel_name = name;
    }
    if let Some(speed) = args.speed {
        vessel_specs.service_speed = speed;
    }
    if let Some(rate) = args.fuel_rate {
        vessel_specs.fuel_consumption = rate;
    }

    let body = AnalyzeBody {
        route_id: args.route,
        vessel_specs,
        laycan_window,
        include_insights: args.insights,
    };

    let client = VoyageClient::new(args.url);
    let analysis = client.analyze(&body).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_summary(&analysis));
    }
    Ok(())
}
