use std::sync::Arc;

use anyhow::Result;

use ticketscout::config::Config;
use ticketscout::constants::{CONFIG_GENERATED, ERROR_NO_API_TOKEN};
use ticketscout::platform::ZendeskClient;
use ticketscout::{i18n, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(path) = Config::generate_default()? {
        println!("{} at {}", CONFIG_GENERATED, path.display());
    }
    let config = Config::load()?;
    logger::init(&config.logging)?;
    i18n::load_translations(&config.ui.locale)?;

    // Check credentials before taking over the terminal
    if std::env::var(&config.platform.api_token_env).is_err() {
        eprintln!("{}", ERROR_NO_API_TOKEN);
        eprintln!("\n💡 To use this app:");
        eprintln!("1. Create an API token in your platform's admin center");
        eprintln!(
            "2. Set it as environment variable: export {}=your_token_here",
            config.platform.api_token_env
        );
        eprintln!("3. Set platform.subdomain and platform.email in the config file");
        eprintln!("4. Run the app again to search your tickets!");
        return Ok(());
    }

    let client = Arc::new(ZendeskClient::new(&config.platform)?);

    // Run the TUI application
    ui::run_app(config, client).await?;

    Ok(())
}
