use crate::catalog::{
    Album, Artist, CatalogSummary, Playlist, PlaylistSelection, ResolvedAlbum, ResolvedArtist,
    ResolvedPlaylist, ResolvedSong, ResolvedUser, Song, User,
};
use crate::catalog_store::Problem;
use crate::commands::{CommandOutput, CommandRecord, ReplayReport};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

// ───────────────────────────────────────────────────────────────────────────────
// Clap Styles
// ───────────────────────────────────────────────────────────────────────────────

pub fn get_styles() -> Styles {
    let heading = Style::new()
        .bold()
        .underline()
        .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let good = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let bad = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));

    Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(good)
        .valid(good)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ───────────────────────────────────────────────────────────────────────────────
// Palette
// ───────────────────────────────────────────────────────────────────────────────

pub mod colors {
    use crossterm::style::Color;

    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 191,
        b: 0,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 180,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 80,
        g: 220,
        b: 100,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 240,
        g: 240,
        b: 240,
    };
}

mod glyphs {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";
    pub const NOTE: &str = "♪";
    pub const BULLET: &str = "●";
    pub const EMPTY: &str = "○";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ───────────────────────────────────────────────────────────────────────────────
// Status lines
// ───────────────────────────────────────────────────────────────────────────────

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        glyphs::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        glyphs::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::AMBER).bold(),
        message.with(colors::AMBER)
    );
}

// ───────────────────────────────────────────────────────────────────────────────
// Sections
// ───────────────────────────────────────────────────────────────────────────────

const SECTION_WIDTH: usize = 56;

pub fn print_section_header(title: &str) {
    let left = 2;
    let right = SECTION_WIDTH.saturating_sub(title.width() + 2 + left);
    println!(
        "{}{} {} {}{}",
        glyphs::TOP_LEFT.with(colors::TEAL),
        glyphs::HORIZONTAL.repeat(left).with(colors::TEAL),
        title.with(colors::AMBER).bold(),
        glyphs::HORIZONTAL.repeat(right).with(colors::TEAL),
        glyphs::TOP_RIGHT.with(colors::TEAL),
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        glyphs::BOTTOM_LEFT.with(colors::TEAL),
        glyphs::HORIZONTAL.repeat(SECTION_WIDTH).with(colors::TEAL),
        glyphs::BOTTOM_RIGHT.with(colors::TEAL),
    );
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::BULLET.with(colors::TEAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_list_item(item: &str) {
    println!(
        "    {}  {}",
        glyphs::NOTE.with(colors::AMBER),
        item.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "    {} {}",
        glyphs::EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

fn print_items<T>(title: &str, items: &[T], describe: impl Fn(&T) -> String) {
    print_key_value(title, &items.len().to_string());
    if items.is_empty() {
        print_empty_list("none");
    }
    for item in items {
        print_list_item(&describe(item));
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Tables
// ───────────────────────────────────────────────────────────────────────────────

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            widths: headers.iter().map(|h| h.width()).collect(),
        }
    }

    /// Cells past the header count are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        let row: Vec<String> = row.into_iter().take(self.headers.len()).collect();
        for (width, cell) in self.widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn border(&self, left: &str, junction: &str, right: &str) -> String {
        let segments: Vec<String> = self
            .widths
            .iter()
            .map(|width| glyphs::HORIZONTAL.repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(junction), right)
            .with(colors::TEAL)
            .to_string()
    }

    fn line(&self, cells: &[String], header: bool) -> String {
        let separator = glyphs::VERTICAL.with(colors::TEAL).to_string();
        let mut out = separator.clone();
        for (index, width) in self.widths.iter().enumerate() {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            if header {
                out.push_str(&format!(" {}{} ", cell.with(colors::AMBER).bold(), padding));
            } else {
                out.push_str(&format!(" {}{} ", cell, padding));
            }
            out.push_str(&separator);
        }
        out
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            self.border(glyphs::TOP_LEFT, glyphs::T_TOP, glyphs::TOP_RIGHT),
            self.line(&self.headers, true),
            self.border(glyphs::T_LEFT, glyphs::CROSS, glyphs::T_RIGHT),
        ];
        lines.extend(self.rows.iter().map(|row| self.line(row, false)));
        lines.push(self.border(glyphs::BOTTOM_LEFT, glyphs::T_BOTTOM, glyphs::BOTTOM_RIGHT));
        lines.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Prompt and greetings
// ───────────────────────────────────────────────────────────────────────────────

pub fn get_prompt() -> String {
    format!(
        "{} {} ",
        "catalog".with(colors::TEAL).bold(),
        glyphs::NOTE.with(colors::AMBER).bold()
    )
}

pub fn print_welcome(summary: &CatalogSummary) {
    println!();
    print_section_header("Music Catalog Store");
    print_key_value("Version", env!("CARGO_PKG_VERSION"));
    print_key_value(
        "Loaded",
        &format!(
            "{} artists, {} albums, {} songs, {} users, {} playlists",
            summary.artists, summary.albums, summary.songs, summary.users, summary.playlists
        ),
    );
    println!("  {}", "Type 'help' for available commands".with(colors::DIM));
    print_section_footer();
    println!();
}

pub fn print_goodbye() {
    println!();
    println!("  {}", "Bye.".with(colors::TEAL).bold());
}

// ───────────────────────────────────────────────────────────────────────────────
// Command output
// ───────────────────────────────────────────────────────────────────────────────

fn describe_selection(selection: &PlaylistSelection) -> String {
    match selection {
        PlaylistSelection::ByLength => "songs of a given length".to_string(),
        PlaylistSelection::ByTitles => "songs picked by title".to_string(),
    }
}

fn describe_song(song: &Song) -> String {
    format!("{} ({}s, {} likes)", song.title, song.length, song.likes)
}

fn describe_user(user: &User) -> String {
    format!("{} <{}>", user.name, user.mobile)
}

fn artists_table(artists: &[Artist]) -> TableBuilder {
    let mut table = TableBuilder::new(&["Id", "Name", "Likes"]);
    for artist in artists {
        table.add_row(vec![
            artist.id.to_string(),
            artist.name.clone(),
            artist.likes.to_string(),
        ]);
    }
    table
}

fn albums_table(albums: &[Album]) -> TableBuilder {
    let mut table = TableBuilder::new(&["Id", "Title"]);
    for album in albums {
        table.add_row(vec![album.id.to_string(), album.title.clone()]);
    }
    table
}

fn songs_table(songs: &[Song]) -> TableBuilder {
    let mut table = TableBuilder::new(&["Id", "Title", "Length", "Likes"]);
    for song in songs {
        table.add_row(vec![
            song.id.to_string(),
            song.title.clone(),
            song.length.to_string(),
            song.likes.to_string(),
        ]);
    }
    table
}

fn users_table(users: &[User]) -> TableBuilder {
    let mut table = TableBuilder::new(&["Id", "Name", "Mobile"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            user.name.clone(),
            user.mobile.clone(),
        ]);
    }
    table
}

fn playlists_table(playlists: &[Playlist]) -> TableBuilder {
    let mut table = TableBuilder::new(&["Id", "Title", "Creator", "Selection"]);
    for playlist in playlists {
        table.add_row(vec![
            playlist.id.to_string(),
            playlist.title.clone(),
            playlist.creator.to_string(),
            describe_selection(&playlist.selection),
        ]);
    }
    table
}

fn print_resolved_artist(view: &ResolvedArtist) {
    print_section_header(&format!("Artist {}", view.artist.name));
    print_key_value("Id", &view.artist.id.to_string());
    print_key_value("Likes", &view.artist.likes.to_string());
    print_items("Albums", &view.albums, |album| album.title.clone());
    print_section_footer();
}

fn print_resolved_album(view: &ResolvedAlbum) {
    print_section_header(&format!("Album {}", view.album.title));
    print_key_value("Id", &view.album.id.to_string());
    print_key_value(
        "Artist",
        view.artist.as_ref().map_or("-", |artist| artist.name.as_str()),
    );
    print_items("Songs", &view.songs, describe_song);
    print_section_footer();
}

fn print_resolved_song(view: &ResolvedSong) {
    print_section_header(&format!("Song {}", view.song.title));
    print_key_value("Id", &view.song.id.to_string());
    print_key_value("Length", &format!("{}s", view.song.length));
    print_key_value("Likes", &view.song.likes.to_string());
    print_key_value(
        "Album",
        view.album.as_ref().map_or("-", |album| album.title.as_str()),
    );
    print_key_value(
        "Artist",
        view.artist.as_ref().map_or("-", |artist| artist.name.as_str()),
    );
    print_items("Liked by", &view.liked_by, describe_user);
    print_section_footer();
}

fn print_resolved_playlist(view: &ResolvedPlaylist) {
    print_section_header(&format!("Playlist {}", view.playlist.title));
    print_key_value("Id", &view.playlist.id.to_string());
    print_key_value("Creator", &describe_user(&view.creator));
    print_key_value("Built from", &describe_selection(&view.playlist.selection));
    print_items("Listeners", &view.listeners, describe_user);
    print_items("Songs", &view.songs, describe_song);
    print_section_footer();
}

fn print_resolved_user(view: &ResolvedUser) {
    print_section_header(&format!("User {}", view.user.name));
    print_key_value("Id", &view.user.id.to_string());
    print_key_value("Mobile", &view.user.mobile);
    print_key_value(
        "Last created playlist",
        view.created_playlist
            .as_ref()
            .map_or("-", |playlist| playlist.title.as_str()),
    );
    print_items("Playlists", &view.playlists, |playlist| playlist.title.clone());
    print_items("Liked songs", &view.liked_songs, describe_song);
    print_section_footer();
}

fn print_summary(summary: &CatalogSummary) {
    print_section_header("Summary");
    print_key_value("Artists", &summary.artists.to_string());
    print_key_value("Albums", &summary.albums.to_string());
    print_key_value("Songs", &summary.songs.to_string());
    print_key_value("Users", &summary.users.to_string());
    print_key_value("Playlists", &summary.playlists.to_string());
    print_key_value("Song likes", &summary.song_likes.to_string());
    print_section_footer();
}

fn print_problems(problems: &[Problem]) {
    if problems.is_empty() {
        print_success("Catalog is consistent.");
        return;
    }
    print_error(&format!("Found {} problems:", problems.len()));
    for problem in problems {
        print_list_item(&problem.to_string());
    }
}

pub fn print_output(output: &CommandOutput) {
    match output {
        CommandOutput::User(user) => {
            print_success(&format!("Created user {} ({})", describe_user(user), user.id))
        }
        CommandOutput::Artist(artist) => {
            print_success(&format!("Created artist {} ({})", artist.name, artist.id))
        }
        CommandOutput::Album(album) => {
            print_success(&format!("Album {} ({})", album.title, album.id))
        }
        CommandOutput::Song(song) => print_success(&describe_song(song)),
        CommandOutput::Playlist(playlist) => print_success(&format!(
            "Playlist {} ({}) from {}",
            playlist.title,
            playlist.id,
            describe_selection(&playlist.selection)
        )),
        CommandOutput::PopularArtist(name) => print_key_value("Most popular artist", name),
        CommandOutput::PopularSong(title) => print_key_value("Most popular song", title),
        CommandOutput::ResolvedArtist(view) => print_resolved_artist(view),
        CommandOutput::ResolvedAlbum(view) => print_resolved_album(view),
        CommandOutput::ResolvedSong(view) => print_resolved_song(view),
        CommandOutput::ResolvedPlaylist(view) => print_resolved_playlist(view),
        CommandOutput::ResolvedUser(view) => print_resolved_user(view),
        CommandOutput::Artists(items) if items.is_empty() => print_empty_list("No artists"),
        CommandOutput::Albums(items) if items.is_empty() => print_empty_list("No albums"),
        CommandOutput::Songs(items) if items.is_empty() => print_empty_list("No songs"),
        CommandOutput::Users(items) if items.is_empty() => print_empty_list("No users"),
        CommandOutput::Playlists(items) if items.is_empty() => print_empty_list("No playlists"),
        CommandOutput::Artists(items) => artists_table(items).print(),
        CommandOutput::Albums(items) => albums_table(items).print(),
        CommandOutput::Songs(items) => songs_table(items).print(),
        CommandOutput::Users(items) => users_table(items).print(),
        CommandOutput::Playlists(items) => playlists_table(items).print(),
        CommandOutput::Summary(summary) => print_summary(summary),
        CommandOutput::Problems(problems) => print_problems(problems),
        CommandOutput::Exit => {}
    }
}

pub fn print_command_record(record: &CommandRecord) {
    match record {
        CommandRecord::Ok { output, .. } => print_output(output),
        CommandRecord::Failed { command, error } => {
            print_error(&format!("{}: {}", command, error))
        }
    }
}

pub fn print_replay_report(report: &ReplayReport) {
    let message = format!(
        "{} commands executed, {} failed, {} lines skipped",
        report.executed, report.failed, report.skipped
    );
    if report.failed == 0 {
        print_success(&message);
    } else {
        print_warning(&message);
    }
}
