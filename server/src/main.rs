use std::path::PathBuf;

use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use clap::Parser;
use slog::crit;
use slog::info;
use slog::Logger;

use healthpoint_logging::Opts;
use healthpoint_status::HealthPoint;
use healthpoint_util_actixweb::configure;
use healthpoint_util_actixweb::LoggingMiddleware;

mod config;
mod dependencies;
mod error;

use self::config::ServerConfig;
use self::error::Error;
use self::error::Result;

#[derive(Parser, Debug)]
#[command(name = "healthpoint", version, about = "Health reporting sidecar for networked services")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, short, default_value = "healthpoint.yaml")]
    config: PathBuf,
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    let opts = Opts::new("healthpoint", env!("CARGO_PKG_VERSION"));
    let logger = healthpoint_logging::starter(&opts);
    if let Err(error) = run(cli, opts).await {
        crit!(logger, "Healthpoint server failed"; "error" => %error, "cause" => ?error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, opts: Opts) -> Result<()> {
    let config = ServerConfig::from_file(&cli.config)?;
    let logger = healthpoint_logging::configure(config.logging.clone(), &opts)?;
    let registry = dependencies::registry(&config.dependencies)?;
    info!(
        logger, "Starting healthpoint server";
        "bind" => &config.bind,
        "dependencies" => registry.len(),
    );

    let healthpoint = web::Data::new(HealthPoint::new(registry, config.status, logger.clone()));
    let bind = config.bind;
    serve(bind, healthpoint, logger).await
}

async fn serve(bind: String, healthpoint: web::Data<HealthPoint>, logger: Logger) -> Result<()> {
    let server_logger = logger.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(healthpoint.clone())
            .wrap(LoggingMiddleware::new(server_logger.clone()))
            .configure(configure)
    })
    .bind(bind.as_str())
    .map_err(|source| Error::Bind {
        bind: bind.clone(),
        source,
    })?;
    server.run().await.map_err(Error::Serve)?;
    info!(logger, "Healthpoint server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn default_config_path() {
        let cli = Cli::try_parse_from(["healthpoint"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("healthpoint.yaml"));
    }

    #[test]
    fn config_path() {
        let cli = Cli::try_parse_from(["healthpoint", "--config", "/etc/healthpoint.yaml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/healthpoint.yaml"));
        let cli = Cli::try_parse_from(["healthpoint", "-c", "local.yaml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("local.yaml"));
    }
}
