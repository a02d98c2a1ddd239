//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Title of the list page when none is configured
pub const DEFAULT_LIST_TITLE: &str = "Implementation Guides";

#[derive(Parser, Debug)]
#[command(name = "ig-publish")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Publish implementation guide builds into a local registry")]
#[command(long_about = "ig-publish - implementation guide registry tool\n\n\
    Copies a built guide into its versioned publish folder, archives it,\n\
    records the edition in the guide's history and in the registry list,\n\
    announces the package in the registry feed and re-renders the pages.\n\n\
    Examples:\n\
      ig-publish publish --project-dir ./my-ig --ig-registry ./registry\n\
      ig-publish render-list --ig-registry ./registry\n\
      ig-publish render-history --history ./my-ig/publish/my-ig/ig_history.json")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish a built project
    Publish {
        /// Path of the project to publish (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        project_dir: Option<PathBuf>,

        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Render the registry list page
    RenderList {
        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Render one guide's history page
    RenderHistory {
        /// History document to render
        #[arg(long, value_name = "FILE")]
        history: PathBuf,
    },

    /// Print the version
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Directory that contains the registry files
    #[arg(long = "ig-registry", env = "IG_REGISTRY", value_name = "DIR")]
    pub ig_registry: PathBuf,

    /// Title of the rendered list page
    #[arg(long, env = "IG_LIST_TITLE", default_value = DEFAULT_LIST_TITLE)]
    pub list_title: String,
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
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "ig-publish",
            "publish",
            "--project-dir",
            "my-ig",
            "--ig-registry",
            "registry",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Publish {
                project_dir,
                registry,
            }) => {
                assert_eq!(project_dir, Some(PathBuf::from("my-ig")));
                assert_eq!(registry.ig_registry, PathBuf::from("registry"));
                assert_eq!(registry.list_title, DEFAULT_LIST_TITLE);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_without_command() {
        let cli = Cli::try_parse_from(["ig-publish"]).unwrap();
        assert!(cli.command.is_none());
    }
}
