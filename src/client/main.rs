/**
 * RescueDesk Command-Line Entry Point
 *
 * Small operator tool over the client library: list collections, sign in
 * and out, check the stored session.
 */

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rescuedesk::client::{
    ApiClient, ApplicationClient, Config, DogClient, FileStorage, LoginRequest, Mode, RegisterRequest,
    RescueClient, SessionStore, VolunteerClient,
};

#[derive(Debug, Parser)]
#[command(name = "rescuedesk", version, about = "Shelter data and session tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List dogs
    Dogs,
    /// List volunteer sign-ups
    Volunteers,
    /// List open rescue reports, most urgent first
    Rescues,
    /// List adoption applications
    Applications,
    /// Sign in
    Login { username: String, password: String },
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        password: String,
        /// Display name (defaults to the username)
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Sign out
    Logout,
    /// Verify the stored session
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing::debug!("[STARTUP] Using {}", config.server_url());
    let storage = Arc::new(FileStorage::new(config.storage_path()));
    let api = ApiClient::new(config)?;

    match command {
        Command::Dogs => print_json(&DogClient::new(api).list().await?),
        Command::Volunteers => print_json(&VolunteerClient::new(api).list().await?),
        Command::Rescues => print_json(&RescueClient::new(api).open().await?),
        Command::Applications => print_json(&ApplicationClient::new(api).list().await?),
        Command::Login { username, password } => {
            let session = SessionStore::new(api, storage);
            let success = session.login(&LoginRequest::new(username, password)).await?;
            println!("signed in as {} ({})", success.user.name, success.user.role);
            Ok(())
        }
        Command::Register {
            username,
            email,
            password,
            name,
        } => {
            let session = SessionStore::new(api, storage);
            let request = RegisterRequest {
                username,
                email,
                password,
                name,
            };
            let success = session.register(&request).await?;
            println!("registered {}", success.user.username);
            Ok(())
        }
        Command::Logout => {
            SessionStore::new(api, storage).logout();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => {
            let session = SessionStore::new(api, storage);
            if !session.verify_token().await {
                println!("not signed in");
                return Ok(());
            }
            match session.current_user() {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
                None => println!("signed in"),
            }
            if session.mode().await == Mode::Local {
                println!("(service unreachable; using local data)");
            }
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_register_name_defaults_to_empty() {
        let cli = Cli::try_parse_from(["rescuedesk", "register", "sam", "sam@example.com", "pw"]).unwrap();
        match cli.command {
            Command::Register { username, name, .. } => {
                assert_eq!(username, "sam");
                assert!(name.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_login_requires_password() {
        assert!(Cli::try_parse_from(["rescuedesk", "login", "jane"]).is_err());
    }
}
