//! Command language for driving a catalog from scripts or a shell.
//!
//! A line is split with shell quoting rules and parsed as a clap subcommand,
//! so `add-song "Yellow Submarine" Revolver 158` works as expected. Since the
//! catalog is volatile, replaying a script is the only way to rebuild state.

use crate::catalog::{
    Album, Artist, CatalogSummary, Playlist, ResolvedAlbum, ResolvedArtist, ResolvedPlaylist,
    ResolvedSong, ResolvedUser, Song, User,
};
use crate::catalog_store::{CatalogManager, CatalogResult, Problem};
use crate::cli_style::get_styles;
use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(styles = get_styles(), name = "")]
pub struct InnerCli {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    /// Creates a user. Mobile numbers are not checked for duplicates.
    AddUser { name: String, mobile: String },

    /// Creates an artist.
    AddArtist { name: String },

    /// Creates an album, creating its artist if needed.
    AddAlbum { title: String, artist: String },

    /// Creates a song in an existing album, length in seconds.
    AddSong {
        title: String,
        album: String,
        length: u32,
    },

    /// Creates a playlist with every song of the given length.
    PlaylistByLength {
        mobile: String,
        title: String,
        length: u32,
    },

    /// Creates a playlist with every song having one of the given titles.
    PlaylistByTitles {
        mobile: String,
        title: String,
        #[arg(required = true)]
        songs: Vec<String>,
    },

    /// Adds a user as listener of a playlist.
    JoinPlaylist { mobile: String, playlist: String },

    /// A user likes a song, the song's artist gets the like too.
    LikeSong { mobile: String, song: String },

    /// Shows the name of the most liked artist.
    PopularArtist,

    /// Shows the title of the most liked song.
    PopularSong,

    /// Shows an artist with its albums.
    ShowArtist { name: String },

    /// Shows an album with its artist and songs.
    ShowAlbum { title: String },

    /// Shows a song with its album, artist and likers.
    ShowSong { title: String },

    /// Shows a playlist with its creator, listeners and songs.
    ShowPlaylist { title: String },

    /// Shows a user with playlists and liked songs.
    ShowUser { mobile: String },

    /// Lists every entity of a kind, in creation order.
    List { kind: EntityKind },

    /// Shows entity counts.
    Summary,

    /// Recomputes like counts and ownership from scratch and reports mismatches.
    Check,

    /// Close this program, or stop replaying a script.
    Exit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Artists,
    Albums,
    Songs,
    Users,
    Playlists,
}

/// Result of a successfully executed command.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CommandOutput {
    User(User),
    Artist(Artist),
    Album(Album),
    Song(Song),
    Playlist(Playlist),
    PopularArtist(String),
    PopularSong(String),
    ResolvedArtist(ResolvedArtist),
    ResolvedAlbum(ResolvedAlbum),
    ResolvedSong(ResolvedSong),
    ResolvedPlaylist(ResolvedPlaylist),
    ResolvedUser(ResolvedUser),
    Artists(Vec<Artist>),
    Albums(Vec<Album>),
    Songs(Vec<Song>),
    Users(Vec<User>),
    Playlists(Vec<Playlist>),
    Summary(CatalogSummary),
    Problems(Vec<Problem>),
    Exit,
}

/// Parses a single line. Blank lines and `#` comments parse to `None`.
///
/// Unbalanced quoting is an error, the words are never used as names.
pub fn parse_command_line(line: &str) -> Result<Option<CatalogCommand>, clap::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let args = shlex::split(line).ok_or_else(|| {
        InnerCli::command().error(ErrorKind::InvalidValue, "unbalanced quotes in command line")
    })?;

    InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)))
        .map(|cli| Some(cli.command))
}

pub fn execute_command(
    manager: &CatalogManager,
    command: CatalogCommand,
) -> CatalogResult<CommandOutput> {
    let output = match command {
        CatalogCommand::AddUser { name, mobile } => {
            CommandOutput::User(manager.create_user(&name, &mobile))
        }
        CatalogCommand::AddArtist { name } => CommandOutput::Artist(manager.create_artist(&name)),
        CatalogCommand::AddAlbum { title, artist } => {
            CommandOutput::Album(manager.create_album(&title, &artist))
        }
        CatalogCommand::AddSong {
            title,
            album,
            length,
        } => CommandOutput::Song(manager.create_song(&title, &album, length)?),
        CatalogCommand::PlaylistByLength {
            mobile,
            title,
            length,
        } => CommandOutput::Playlist(manager.create_playlist_by_length(&mobile, &title, length)?),
        CatalogCommand::PlaylistByTitles {
            mobile,
            title,
            songs,
        } => CommandOutput::Playlist(manager.create_playlist_by_titles(&mobile, &title, &songs)?),
        CatalogCommand::JoinPlaylist { mobile, playlist } => {
            CommandOutput::Playlist(manager.join_playlist(&mobile, &playlist)?)
        }
        CatalogCommand::LikeSong { mobile, song } => {
            CommandOutput::Song(manager.like_song(&mobile, &song)?)
        }
        CatalogCommand::PopularArtist => {
            CommandOutput::PopularArtist(manager.most_popular_artist()?)
        }
        CatalogCommand::PopularSong => CommandOutput::PopularSong(manager.most_popular_song()?),
        CatalogCommand::ShowArtist { name } => {
            CommandOutput::ResolvedArtist(manager.resolve_artist(&name)?)
        }
        CatalogCommand::ShowAlbum { title } => {
            CommandOutput::ResolvedAlbum(manager.resolve_album(&title)?)
        }
        CatalogCommand::ShowSong { title } => {
            CommandOutput::ResolvedSong(manager.resolve_song(&title)?)
        }
        CatalogCommand::ShowPlaylist { title } => {
            CommandOutput::ResolvedPlaylist(manager.resolve_playlist(&title)?)
        }
        CatalogCommand::ShowUser { mobile } => {
            CommandOutput::ResolvedUser(manager.resolve_user(&mobile)?)
        }
        CatalogCommand::List { kind } => match kind {
            EntityKind::Artists => CommandOutput::Artists(manager.list_artists()),
            EntityKind::Albums => CommandOutput::Albums(manager.list_albums()),
            EntityKind::Songs => CommandOutput::Songs(manager.list_songs()),
            EntityKind::Users => CommandOutput::Users(manager.list_users()),
            EntityKind::Playlists => CommandOutput::Playlists(manager.list_playlists()),
        },
        CatalogCommand::Summary => CommandOutput::Summary(manager.summary()),
        CatalogCommand::Check => CommandOutput::Problems(manager.check_integrity()),
        CatalogCommand::Exit => CommandOutput::Exit,
    };
    Ok(output)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Abort on the first line that fails to parse or execute.
    #[default]
    Strict,
    /// Log failing lines and keep going.
    Lenient,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub executed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Outcome of one command given outside a script.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandRecord {
    Ok {
        command: String,
        output: CommandOutput,
    },
    Failed {
        command: String,
        error: String,
    },
}

enum LineOutcome {
    Skipped,
    Exit,
    Done(Result<CommandOutput>),
}

fn run_line(manager: &CatalogManager, line: &str) -> LineOutcome {
    match parse_command_line(line) {
        Ok(None) => LineOutcome::Skipped,
        Ok(Some(CatalogCommand::Exit)) => LineOutcome::Exit,
        Ok(Some(command)) => {
            LineOutcome::Done(execute_command(manager, command).map_err(anyhow::Error::from))
        }
        Err(err) => LineOutcome::Done(Err(anyhow::anyhow!("{}", err.to_string().trim_end()))),
    }
}

/// Replays every command of `script` against the manager.
///
/// `exit` stops the replay early; the remaining lines are not counted.
pub fn replay_script(
    manager: &CatalogManager,
    script: &str,
    mode: ReplayMode,
) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, line) in script.lines().enumerate() {
        let line_number = index + 1;

        let outcome = match run_line(manager, line) {
            LineOutcome::Skipped => {
                report.skipped += 1;
                continue;
            }
            LineOutcome::Exit => {
                debug!("Script exits at line {}", line_number);
                break;
            }
            LineOutcome::Done(outcome) => outcome,
        };

        match outcome {
            Ok(_) => report.executed += 1,
            Err(err) => match mode {
                ReplayMode::Strict => {
                    bail!("Line {} ({}): {}", line_number, line.trim(), err)
                }
                ReplayMode::Lenient => {
                    warn!("Skipping line {} ({}): {}", line_number, line.trim(), err);
                    report.failed += 1;
                }
            },
        }
    }

    info!(
        "Replayed {} commands, {} failed, {} lines skipped",
        report.executed, report.failed, report.skipped
    );
    Ok(report)
}

/// Runs standalone commands in order, keeping the output or error of each.
///
/// In strict mode the first failing command aborts the run.
pub fn run_commands(
    manager: &CatalogManager,
    commands: &[String],
    mode: ReplayMode,
) -> Result<(ReplayReport, Vec<CommandRecord>)> {
    let mut report = ReplayReport::default();
    let mut records = Vec::new();

    for line in commands {
        match run_line(manager, line) {
            LineOutcome::Skipped => report.skipped += 1,
            LineOutcome::Exit => break,
            LineOutcome::Done(Ok(output)) => {
                report.executed += 1;
                records.push(CommandRecord::Ok {
                    command: line.clone(),
                    output,
                });
            }
            LineOutcome::Done(Err(err)) => match mode {
                ReplayMode::Strict => bail!("Command {:?} failed: {}", line, err),
                ReplayMode::Lenient => {
                    warn!("Command {:?} failed: {}", line, err);
                    report.failed += 1;
                    records.push(CommandRecord::Failed {
                        command: line.clone(),
                        error: err.to_string(),
                    });
                }
            },
        }
    }

    Ok((report, records))
}

pub fn replay_file(manager: &CatalogManager, path: &Path, mode: ReplayMode) -> Result<ReplayReport> {
    info!("Replaying script {:?}...", path);
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {:?}", path))?;
    replay_script(manager, &script, mode).with_context(|| format!("Replay of {:?} failed", path))
}
