use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use senpai::areas::repository::{DEFAULT_BRANCH, Repository, RepositoryConfig};
use senpai::artifacts::objects::object_type::ObjectType;
use senpai::commands::plumbing::cat_file::CatFileMode;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SENPAI_LOG=senpai=debug`
const LOG_ENV: &str = "SENPAI_LOG";

#[derive(Parser)]
#[command(
    name = "senpai",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control engine",
    long_about = "senpai stores snapshots of a directory as content-addressed objects, \
    stages changes in a plain-text index and moves between commits and branches \
    the way git does.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path. \
        An initial branch without any commits is created."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_BRANCH, help = "Name of the initial branch")]
        initial_branch: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as an object of the given type and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long = "type", default_value = "blob", help = "Object type")]
        object_type: ObjectType,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Provide the content or details of an object",
        group(ArgGroup::new("mode").required(true).args(["show_type", "size", "exists", "pretty"]))
    )]
    CatFile {
        #[arg(short = 't', help = "Show the object type")]
        show_type: bool,
        #[arg(short = 's', help = "Show the object size")]
        size: bool,
        #[arg(short = 'e', help = "Exit with zero status if the object exists")]
        exists: bool,
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "write-tree",
        about = "Write the working directory as tree objects and print the root tree id"
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object from an existing tree",
        long_about = "This command creates a commit object for the given tree. \
        Neither HEAD nor the index are touched."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short = 'p', long = "parent", help = "A parent commit SHA (repeatable)")]
        parents: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages files and directories. Directories are expanded to their non-ignored files."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The paths to add")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the index and moves the current branch to it."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show commit logs")]
    Log,
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "Without arguments, this command lists all existing branches, \
        marking the current branch with an asterisk (*)."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create or delete")]
        name: Option<String>,
        #[arg(short, long, requires = "name", help = "Delete the branch")]
        delete: bool,
        #[arg(short, long, help = "Show the tip commit of every branch")]
        verbose: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "This command replaces the working directory and the index with the target's tree. \
        Untracked files are removed."
    )]
    Checkout {
        #[arg(short = 'b', help = "Create the branch at HEAD and switch to it")]
        new_branch: bool,
        #[arg(index = 1, help = "A branch name or a full commit SHA")]
        target: String,
    },
    #[command(name = "config", about = "Get and set repository options")]
    Config {
        #[arg(short, long, help = "List all options")]
        list: bool,
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
    #[command(name = "remote", about = "Manage the set of tracked repositories")]
    Remote {
        #[arg(short, long, help = "Show remote URLs")]
        verbose: bool,
        #[command(subcommand)]
        action: Option<RemoteCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    #[command(about = "List all options")]
    List,
    #[command(about = "Print the value of a section.key option")]
    Get { key: String },
    #[command(about = "Set the value of a section.key option")]
    Set { key: String, value: String },
}

#[derive(Subcommand)]
enum RemoteCommands {
    #[command(about = "List remotes")]
    List,
    #[command(about = "Add a remote")]
    Add { name: String, url: String },
    #[command(about = "Remove a remote")]
    Remove { name: String },
    #[command(name = "get-url", about = "Print the URL of a remote")]
    GetUrl { name: String },
    #[command(name = "set-url", about = "Change the URL of a remote")]
    SetUrl { name: String, url: String },
}

fn main() -> Result<()> {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let current_dir = std::env::current_dir().context("Failed to read the current directory")?;

    match cli.command {
        Commands::Init {
            path,
            initial_branch,
        } => {
            let path = path.unwrap_or_else(|| current_dir.clone());
            let config = RepositoryConfig::default().with_initial_branch(initial_branch);
            let repository = Repository::new(&path, config, Box::new(std::io::stdout()))
                .with_context(|| format!("Failed to create {}", path.display()))?;

            repository.init()?;
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => {
            // hashing alone needs no repository
            let repository = Repository::new(
                &current_dir,
                RepositoryConfig::default(),
                Box::new(std::io::stdout()),
            )?;

            repository.hash_object(&file, object_type, write)?;
        }
        Commands::CatFile {
            show_type,
            size,
            exists,
            pretty,
            sha,
        } => {
            let mode = [
                (show_type, CatFileMode::Type),
                (size, CatFileMode::Size),
                (exists, CatFileMode::Exists),
                (pretty, CatFileMode::Pretty),
            ]
            .into_iter()
            .find_map(|(selected, mode)| selected.then_some(mode))
            .unwrap_or(CatFileMode::Pretty);

            open_repository(&current_dir)?.cat_file(&sha, mode)?;
        }
        Commands::WriteTree => {
            open_repository(&current_dir)?.write_tree()?;
        }
        Commands::CommitTree {
            tree,
            parents,
            message,
        } => {
            open_repository(&current_dir)?.commit_tree(&tree, &parents, &message)?;
        }
        Commands::Add { paths } => {
            open_repository(&current_dir)?.add(&paths)?;
        }
        Commands::Commit { message } => {
            open_repository(&current_dir)?.commit(&message)?;
        }
        Commands::Status => {
            open_repository(&current_dir)?.status()?;
        }
        Commands::Log => {
            open_repository(&current_dir)?.log()?;
        }
        Commands::Branch {
            name,
            delete,
            verbose,
        } => {
            let repository = open_repository(&current_dir)?;

            match name {
                Some(name) if delete => {
                    repository.delete_branch(&name)?;
                }
                Some(name) => {
                    repository.create_branch(&name)?;
                }
                None => {
                    repository.list_branches(verbose)?;
                }
            }
        }
        Commands::Checkout { new_branch, target } => {
            let repository = open_repository(&current_dir)?;

            if new_branch {
                repository.checkout_new_branch(&target)?;
            } else {
                repository.checkout(&target)?;
            }
        }
        Commands::Config { list, action } => {
            let repository = open_repository(&current_dir)?;

            match action {
                Some(ConfigCommands::Get { key }) => {
                    repository.config_get(&key)?;
                }
                Some(ConfigCommands::Set { key, value }) => {
                    repository.config_set(&key, &value)?;
                }
                Some(ConfigCommands::List) => {
                    repository.config_list()?;
                }
                None if list => {
                    repository.config_list()?;
                }
                None => anyhow::bail!("usage: senpai config (--list | list | get <key> | set <key> <value>)"),
            }
        }
        Commands::Remote { verbose, action } => {
            let repository = open_repository(&current_dir)?;

            match action {
                None | Some(RemoteCommands::List) => {
                    repository.remote_list(verbose)?;
                }
                Some(RemoteCommands::Add { name, url }) => repository.remote_add(&name, &url)?,
                Some(RemoteCommands::Remove { name }) => repository.remote_remove(&name)?,
                Some(RemoteCommands::GetUrl { name }) => {
                    repository.remote_get_url(&name)?;
                }
                Some(RemoteCommands::SetUrl { name, url }) => repository.remote_set_url(&name, &url)?,
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::open(path, RepositoryConfig::default(), Box::new(std::io::stdout()))
        .with_context(|| format!("Failed to open a repository at {}", path.display()))
}
