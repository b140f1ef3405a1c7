use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Gateway;
use crate::domain::models::SessionSummary;
use crate::domain::models::MODEL_CATALOG;
use crate::domain::services::actions::help_text;
use crate::infrastructure::gateway::auth::AuthStore;
use crate::infrastructure::gateway::http::HttpGateway;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_session(session: &SessionSummary) -> String {
    let mut res = format!("- (ID: {}) {}", session.id, session.title);
    if !session.updated_at.is_empty() {
        res = format!("{res}, updated {}", session.updated_at);
    }

    return res;
}

async fn print_sessions_list() -> Result<()> {
    let sessions = HttpGateway::default()
        .list_sessions()
        .await?
        .iter()
        .map(|session| {
            return format_session(session);
        })
        .collect::<Vec<String>>();

    if sessions.is_empty() {
        println!("There are no sessions available. You should start your first one!");
    } else {
        println!("{}", sessions.join("\n"));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn login_interactive() -> Result<()> {
    let mut username = Config::get(ConfigKey::Username);
    username = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Username")
        .with_initial_text(username)
        .interact_text()?;

    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let session = AuthStore::default().login(&username, &password).await?;
    let display_name = session.username().unwrap_or(username);
    println!("Logged in as {display_name}.");

    return Ok(());
}

/// Reads the persisted auth session, the equivalent of the login redirect:
/// without a token the chat UI refuses to start.
async fn require_auth() -> Result<bool> {
    let auth = AuthStore::default().load().await?;
    match auth {
        Some(session) => {
            Config::set(ConfigKey::AuthToken, &session.token);
            if let Some(username) = session.username() {
                Config::set(ConfigKey::Username, &username);
            }
            return Ok(true);
        }
        None => {
            println!("You are not logged in. Run `luminous login` first.");
            return Ok(false);
        }
    }
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_sessions() -> Command {
    return Command::new("sessions")
        .about("Browse past chat sessions.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list").about("List all previous sessions with their ids and titles."),
        );
}

fn arg_model_tier() -> Arg {
    return Arg::new(ConfigKey::ModelTier.to_string())
        .short('m')
        .long(ConfigKey::ModelTier.to_string())
        .env("LUMINOUS_MODEL_TIER")
        .num_args(1)
        .help(format!(
            "The model tier sent with each outgoing message. [default: {}]",
            Config::default(ConfigKey::ModelTier)
        ))
        .value_parser(PossibleValuesParser::new(
            MODEL_CATALOG.map(|model| return model.id),
        ));
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerUrl.to_string())
        .short('s')
        .long(ConfigKey::ServerUrl.to_string())
        .env("LUMINOUS_SERVER_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the Luminous chat backend. [default: {}]",
            Config::default(ConfigKey::ServerUrl)
        ));
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("LUMINOUS_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before a request to the backend times out. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start the chat interface.")
        .arg(arg_model_tier());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("luminous")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("login").about("Log in to the chat backend and store the token locally."))
        .subcommand(Command::new("logout").about("Remove the locally stored login token."))
        .subcommand(subcommand_sessions())
        .arg(arg_model_tier())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LUMINOUS_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("LUMINOUS_USERNAME")
                .num_args(1)
                .help("Your user name displayed in the feed and sent at login.")
                .global(true),
        )
        .arg(arg_server_url().global(true))
        .arg(arg_request_timeout().global(true));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return require_auth().await;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("login", _)) => {
            Config::load(build(), vec![&matches]).await?;
            login_interactive().await?;
            return Ok(false);
        }
        Some(("logout", _)) => {
            AuthStore::default().clear().await?;
            println!("Logged out.");
            return Ok(false);
        }
        Some(("sessions", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("list", _)) => {
                Config::load(build(), vec![&matches]).await?;
                if !require_auth().await? {
                    return Ok(false);
                }
                print_sessions_list().await?;
                return Ok(false);
            }
            _ => {
                subcommand_sessions().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
            return require_auth().await;
        }
    }

    return Ok(true);
}
