use std::path::Path;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;

use shoprake::browser::{BrowserSession, CdpBrowser};
use shoprake::core::config;
use shoprake::output;
use shoprake::Harvester;

#[derive(Parser, Debug)]
#[command(name = "shoprake", version, about = "Harvest a marketplace shop's catalog into a CSV")]
struct Cli {
    /// Shop catalog base URL (falls back to shoprake.json, then a prompt)
    shop_url: Option<String>,

    /// CSV output path (default: products.csv)
    #[arg(short, long)]
    out: Option<String>,

    /// Run without a browser window. Challenges cannot be solved manually in
    /// this mode — use only for shops that never challenge.
    #[arg(long)]
    headless: bool,

    /// Also copy the CSV to the system clipboard
    #[cfg(feature = "clipboard")]
    #[arg(long)]
    clipboard: bool,
}

fn prompt_shop_url() -> anyhow::Result<String> {
    use std::io::Write;
    print!("Shop catalog URL: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let file = config::load_config_file();

    let mut shop_url = cli.shop_url.clone();
    if shop_url.is_none()
        && file.shop_url.is_none()
        && std::env::var("SHOPRAKE_SHOP_URL").is_err()
    {
        shop_url = Some(prompt_shop_url()?);
    }

    let mut cfg = file
        .resolve(shop_url)
        .ok_or_else(|| anyhow!("no shop URL provided (argument, shoprake.json, or SHOPRAKE_SHOP_URL)"))?;
    if let Some(out) = cli.out {
        cfg.output = out;
    }
    if cli.headless {
        cfg.headless = true;
    }

    info!("Target shop: {}", cfg.shop_url);

    let session = BrowserSession::launch(&cfg).await?;
    let browser = CdpBrowser::new(session.page.clone(), cfg.nav_timeout);

    let harvester = Harvester::new(cfg.clone());
    let products = harvester.run(&browser).await;

    session.close().await;
    let products = products?;

    info!("Writing {} products to {}", products.len(), cfg.output);
    output::csv::write_csv(Path::new(&cfg.output), &products)?;

    #[cfg(feature = "clipboard")]
    if cli.clipboard {
        let table = output::csv::to_csv_string(&products)?;
        match output::clipboard::copy_text(&table) {
            Ok(()) => info!("CSV copied to clipboard"),
            Err(e) => tracing::warn!("Clipboard copy failed (non-fatal): {}", e),
        }
    }

    Ok(())
}
