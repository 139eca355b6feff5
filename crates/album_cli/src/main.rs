//! Command-line front end for the album store.
//!
//! # Responsibility
//! - Play the presentation role: list, add, edit, delete and search albums.
//! - Validate required input before any write reaches the repository.
//!
//! Configuration comes from `ALBUM_DB_PATH`, `ALBUM_LOG_LEVEL` and
//! `ALBUM_LOG_DIR`.

use album_core::{
    init_logging, Album, AlbumConfig, AlbumDraft, AlbumId, AlbumRepository, SqliteAlbumStore,
};
use log::info;
use std::process::ExitCode;

const USAGE: &str = "usage: album_cli <command> [args]

commands:
  list                         list all albums
  add <artist> <name>          add an album
  edit <id> <artist> <name>    overwrite an album
  delete <id>                  delete an album
  search-artist <pattern>      albums whose artist contains pattern
  search-name <pattern>        albums whose name contains pattern
  version                      print core version";

const NO_RECORDS: &str = "No Records Found";
const FILL_ALL_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Add { artist: String, name: String },
    Edit { id: AlbumId, artist: String, name: String },
    Delete { id: AlbumId },
    SearchArtist(String),
    SearchName(String),
    Version,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if command == Command::Version {
        println!("album_core version={}", album_core::core_version());
        return ExitCode::SUCCESS;
    }

    let config = match AlbumConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = match SqliteAlbumStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open {}: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let repo = AlbumRepository::new(store);
    info!("event=cli_command module=cli status=start command={command:?}");

    if run(&repo, command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(repo: &AlbumRepository<SqliteAlbumStore>, command: Command) -> bool {
    match command {
        Command::List => print_albums(&repo.get_all_albums()),
        Command::SearchArtist(pattern) => print_albums(&repo.search_by_artist(&pattern)),
        Command::SearchName(pattern) => print_albums(&repo.search_by_name(&pattern)),
        Command::Add { artist, name } => {
            let Ok(draft) = AlbumDraft::new(artist, name) else {
                println!("{FILL_ALL_FIELDS}");
                return false;
            };
            match repo.add_album(draft.artist(), draft.name()) {
                Some(id) => {
                    println!("added {}", draft.into_album(id));
                    true
                }
                None => {
                    println!("failed to add album");
                    false
                }
            }
        }
        Command::Edit { id, artist, name } => {
            let Ok(draft) = AlbumDraft::new(artist, name) else {
                println!("{FILL_ALL_FIELDS}");
                return false;
            };
            let album = draft.into_album(id);
            let updated = repo.update_album(&album);
            if updated {
                println!("updated {album}");
            } else {
                println!("album {id} not found");
            }
            updated
        }
        Command::Delete { id } => {
            let deleted = repo.delete_album(id);
            if deleted {
                println!("deleted album {id}");
            } else {
                println!("album {id} not found");
            }
            deleted
        }
        Command::Version => true,
    }
}

fn print_albums(albums: &[Album]) -> bool {
    if albums.is_empty() {
        println!("{NO_RECORDS}");
    }
    for album in albums {
        println!("{album}");
    }
    true
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Err("missing command".to_string());
    };

    match (name.as_str(), rest) {
        ("list", []) => Ok(Command::List),
        ("version", []) => Ok(Command::Version),
        ("add", [artist, album]) => Ok(Command::Add {
            artist: artist.clone(),
            name: album.clone(),
        }),
        ("edit", [id, artist, album]) => Ok(Command::Edit {
            id: parse_id(id)?,
            artist: artist.clone(),
            name: album.clone(),
        }),
        ("delete", [id]) => Ok(Command::Delete { id: parse_id(id)? }),
        ("search-artist", [pattern]) => Ok(Command::SearchArtist(pattern.clone())),
        ("search-name", [pattern]) => Ok(Command::SearchName(pattern.clone())),
        (other, _) => Err(format!("unknown command or wrong arguments: `{other}`")),
    }
}

fn parse_id(value: &str) -> Result<AlbumId, String> {
    value
        .trim()
        .parse::<AlbumId>()
        .map_err(|_| format!("album id must be an integer, got `{value}`"))
}
