use crate::demo::{run_demo, DemoArgs};
use crate::server;
use catfolio::config::AppConfig;
use catfolio::error::AppError;
use catfolio::settings::{JsonFileSettingsStore, Settings, SettingsStore, Volume};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Catfolio",
    about = "Serve and demo the Catfolio budgeting and scam-awareness minigames",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Play both minigames with a scripted player and print the results
    Demo(DemoArgs),
    /// Inspect or change the persisted player settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Persist a new volume percentage
    SetVolume {
        #[arg(value_parser = clap::value_parser!(u16).range(0..=100))]
        volume: u16,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Settings { command } => run_settings(command),
    }
}

fn run_settings(command: SettingsCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = JsonFileSettingsStore::new(config.settings.path);

    match command {
        SettingsCommand::Show => {
            let settings = store.load()?;
            println!("Settings file: {}", store.path().display());
            println!("- volume: {}%", settings.volume.percent());
        }
        SettingsCommand::SetVolume { volume } => {
            let settings = Settings {
                volume: Volume::new(volume)?,
            };
            store.save(&settings)?;
            println!(
                "Volume set to {}% in {}",
                settings.volume.percent(),
                store.path().display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["catfolio-api"]).expect("parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["catfolio-api", "serve", "--port", "8080"]).expect("parses");
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn set_volume_is_range_checked() {
        assert!(Cli::try_parse_from(["catfolio-api", "settings", "set-volume", "100"]).is_ok());
        assert!(Cli::try_parse_from(["catfolio-api", "settings", "set-volume", "101"]).is_err());
    }
}
