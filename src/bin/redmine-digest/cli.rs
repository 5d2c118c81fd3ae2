use std::path::PathBuf;

use clap::{ArgAction, Parser};
use redmine_digest::config::Overrides;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Résumé hebdomadaire des tickets Redmine vers Slack",
    long_about = None
)]
pub struct Cli {
    /// Chemin du fichier de configuration TOML.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Clé d'API Redmine.
    #[arg(short = 'k', long = "redmine-apikey", value_name = "KEY")]
    pub redmine_api_key: Option<String>,

    /// URL de l'instance Redmine.
    #[arg(short = 'r', long = "redmine-endpoint", value_name = "URL")]
    pub redmine_endpoint: Option<String>,

    /// Projet cible (identifiant numérique, nom ou identifiant texte).
    #[arg(short = 'p', long = "redmine-project", value_name = "PROJECT")]
    pub redmine_project: Option<String>,

    /// Identifiants des statuts considérés comme terminés (répétable).
    #[arg(short = 'f', long = "redmine-finished-status", value_name = "ID", action = ArgAction::Append)]
    pub finished_status: Vec<u32>,

    /// Jeton d'API Slack.
    #[arg(short = 't', long = "slack-token", value_name = "TOKEN")]
    pub slack_token: Option<String>,

    /// Canal Slack de destination.
    #[arg(short = 'c', long = "slack-channel", value_name = "CHANNEL")]
    pub slack_channel: Option<String>,

    /// Autorise une URL Redmine HTTP non chiffrée.
    #[arg(long, action = ArgAction::SetTrue)]
    pub insecure: bool,

    /// N'envoie rien sur Slack, affiche seulement le message.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Utilise un layer JSON pour les logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Filtre de logs explicite (ex. "redmine_digest=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            redmine_endpoint: self.redmine_endpoint.clone(),
            redmine_api_key: self.redmine_api_key.clone(),
            redmine_project: self.redmine_project.clone(),
            finished_status: self.finished_status.clone(),
            slack_token: self.slack_token.clone(),
            slack_channel: self.slack_channel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_map_to_overrides() {
        let cli = match Cli::try_parse_from([
            "redmine-digest",
            "-k",
            "key",
            "-r",
            "https://redmine.example.com",
            "-p",
            "web",
            "-f",
            "5",
            "-f",
            "6",
            "-t",
            "xoxb",
            "-c",
            "#dev",
        ]) {
            Ok(cli) => cli,
            Err(err) => panic!("arguments should parse: {err}"),
        };
        let overrides = cli.overrides();
        assert_eq!(overrides.redmine_project.as_deref(), Some("web"));
        assert_eq!(overrides.finished_status, vec![5, 6]);
        assert_eq!(overrides.slack_channel.as_deref(), Some("#dev"));
        assert!(!cli.dry_run);
    }
}
