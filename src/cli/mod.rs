use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::domain::{
    album::Album,
    artist::Artist,
    song::{Song, SongDetails},
};
use crate::storage::operations::{
    AlbumFilters, ArtistFilters, Catalog, DistinctColumn, SongFilters,
};
use crate::storage::query::Filter;

const UNKNOWN_ARTIST: &str = "Unknown artist";
const UNKNOWN_ALBUM: &str = "Unknown album";

#[derive(Parser)]
#[command(name = "music-catalog")]
#[command(version = "0.1")]
#[command(about = "Browse a local catalog of artists, albums and songs")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "catalog.toml")]
    pub config: PathBuf,

    /// Database file, overrides the config
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, conflicts_with = "database")]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List artists
    Artists {
        /// Text searched in the name and the description
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        genre: Option<String>,
        #[arg(short = 'C', long)]
        country: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show one artist
    Artist { id: i64 },
    /// List albums
    Albums {
        /// Text searched in the album title and the artist name
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        artist: Option<String>,
        #[arg(short, long)]
        genre: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one album
    Album { id: i64 },
    /// List songs
    Songs {
        /// Text searched in the song title
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        artist: Option<String>,
        #[arg(short = 'b', long)]
        album: Option<String>,
        #[arg(short, long)]
        genre: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one song
    Song { id: i64 },
    /// List the values available for a filter
    Filters {
        #[arg(value_enum)]
        column: FilterColumn,
    },
}

/// Selector columns as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterColumn {
    ArtistName,
    ArtistGenre,
    ArtistCountry,
    AlbumGenre,
    AlbumTitle,
    SongGenre,
}

impl From<FilterColumn> for DistinctColumn {
    fn from(column: FilterColumn) -> Self {
        match column {
            FilterColumn::ArtistName => DistinctColumn::ArtistName,
            FilterColumn::ArtistGenre => DistinctColumn::ArtistGenre,
            FilterColumn::ArtistCountry => DistinctColumn::ArtistCountry,
            FilterColumn::AlbumGenre => DistinctColumn::AlbumGenre,
            FilterColumn::AlbumTitle => DistinctColumn::AlbumTitle,
            FilterColumn::SongGenre => DistinctColumn::SongGenre,
        }
    }
}

fn filter(value: &Option<String>) -> Filter {
    Filter::parse(value.as_deref())
}

fn database_config(cli: &Cli, cfg: &Config) -> config::Database {
    if cli.in_memory {
        config::Database::in_memory()
    } else if let Some(path) = &cli.database {
        config::Database {
            in_memory: false,
            path: Some(path.clone()),
        }
    } else {
        cfg.database.clone()
    }
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;
    let catalog = Catalog::new(&database_config(&cli, &cfg))?;

    match &cli.command {
        Commands::Artists {
            search,
            genre,
            country,
            json,
        } => {
            let filters = ArtistFilters {
                search: filter(search),
                genre: filter(genre),
                country: filter(country),
            };
            let artists = catalog.list_artists(&filters)?;
            if *json {
                print_json(&artists)?;
            } else {
                print_list(&artists, "No artists found", |a| {
                    render_artist_row(a, cfg.display.description_preview)
                });
            }
        }

        Commands::Artist { id } => match catalog.get_artist(*id)? {
            Some(artist) => println!("{}", render_artist_detail(&artist)),
            None => println!("Artist {id} not found"),
        },

        Commands::Albums {
            search,
            artist,
            genre,
            json,
        } => {
            let filters = AlbumFilters {
                search: filter(search),
                artist: filter(artist),
                genre: filter(genre),
            };
            let albums = catalog.list_albums(&filters)?;
            if *json {
                print_json(&albums)?;
            } else {
                print_list(&albums, "No albums found", render_album_row);
            }
        }

        Commands::Album { id } => match catalog.get_album(*id)? {
            Some(album) => println!("{}", render_album_detail(&album)),
            None => println!("Album {id} not found"),
        },

        Commands::Songs {
            search,
            artist,
            album,
            genre,
            json,
        } => {
            let filters = SongFilters {
                search: filter(search),
                artist: filter(artist),
                album: filter(album),
                genre: filter(genre),
            };
            let songs = catalog.list_songs(&filters)?;
            if *json {
                print_json(&songs)?;
            } else {
                print_list(&songs, "No songs found", render_song_row);
            }
        }

        Commands::Song { id } => match catalog.get_song(*id)? {
            Some(song) => {
                let details = catalog.song_details(*id)?.unwrap_or(SongDetails {
                    artist_name: None,
                    album_title: None,
                });
                println!("{}", render_song_detail(&song, &details));
            }
            None => println!("Song {id} not found"),
        },

        Commands::Filters { column } => {
            for value in catalog.distinct_values((*column).into())? {
                println!("{value}");
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(items: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(items).context("Failed to serialize results")?;
    println!("{json}");
    Ok(())
}

fn print_list<T>(items: &[T], empty: &str, render: impl Fn(&T) -> String) {
    if items.is_empty() {
        println!("{empty}");
    }
    for item in items {
        println!("{}", render(item));
    }
}

fn render_artist_row(artist: &Artist, preview: usize) -> String {
    format!(
        "[{}] {}\n  Genre: {}  Country: {}\n  {}",
        artist.id,
        artist.name,
        artist.genre,
        artist.country,
        artist.description_preview(preview)
    )
}

fn render_artist_detail(artist: &Artist) -> String {
    format!(
        "{}\n  Genre: {}\n  Country: {}\n\n{}",
        artist.name, artist.genre, artist.country, artist.description
    )
}

fn render_album_row(album: &Album) -> String {
    format!(
        "[{}] {} - {} ({}) {}",
        album.id,
        album.title,
        album.artist_name.as_deref().unwrap_or(UNKNOWN_ARTIST),
        album.year,
        album.genre
    )
}

fn render_album_detail(album: &Album) -> String {
    format!(
        "{}\n  Artist: {}\n  Year: {}\n  Genre: {}",
        album.title,
        album.artist_name.as_deref().unwrap_or(UNKNOWN_ARTIST),
        album.year,
        album.genre
    )
}

fn render_song_row(song: &Song) -> String {
    format!(
        "[{}] {}  {}\n  {} - {}  Genre: {}",
        song.id,
        song.title,
        song.duration_display,
        song.artist_name.as_deref().unwrap_or(UNKNOWN_ARTIST),
        song.album_title.as_deref().unwrap_or(UNKNOWN_ALBUM),
        song.genre
    )
}

fn render_song_detail(song: &Song, details: &SongDetails) -> String {
    format!(
        "{}\n  Artist: {}\n  Album: {}\n  Genre: {}\n  Duration: {}\n  Open: {}",
        song.title,
        details.artist_name.as_deref().unwrap_or(UNKNOWN_ARTIST),
        details.album_title.as_deref().unwrap_or(UNKNOWN_ALBUM),
        song.genre,
        song.duration_display,
        song.playable_url().unwrap_or("not available")
    )
}
