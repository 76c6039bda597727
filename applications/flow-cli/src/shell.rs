//! Interactive shell commands
//!
//! One command per line. Track numbers are 1-based, as printed in listings.

use crate::error::AppError;
use flow_core::{Genre, SearchQuery};
use flow_playback::PlaybackMode;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  owned | suggested | popular <genre> | search [-a] <text>   load a playlist
  live                                                       show the playing playlist
  play <n> | toggle | pause | stop | next | prev             transport
  seek <secs> | volume <0-100>                               position and level
  mode <Shuffle|Repeat Single|Repeat All|Repeat Off>         iteration policy
  shuffle | loop                                             toggle buttons
  finish                                                     end the current track
  download <n> | list | status | genres | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Owned,
    Suggested,
    Popular(Genre),
    Search(SearchQuery),
    Live,
    /// 0-based row of the displayed playlist
    Play(usize),
    Toggle,
    Pause,
    Stop,
    Next,
    Previous,
    Seek(u64),
    Volume(u8),
    Mode(PlaybackMode),
    Shuffle,
    Loop,
    Finish,
    /// 0-based row of the displayed playlist
    Download(usize),
    List,
    Status,
    Genres,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "owned" | "my" => Self::Owned,
            "suggested" => Self::Suggested,
            "popular" => Self::Popular(rest.parse()?),
            "search" => Self::Search(parse_search(rest)?),
            "live" | "current" => Self::Live,
            "play" => Self::Play(parse_row(rest)?),
            "toggle" => Self::Toggle,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            "next" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "seek" => Self::Seek(parse_number(rest, "seconds")?),
            "volume" | "vol" => Self::Volume(parse_number(rest, "volume")?),
            "mode" => Self::Mode(
                PlaybackMode::from_menu_label(rest)
                    .ok_or_else(|| AppError::InvalidCommand(format!("unknown mode {:?}", rest)))?,
            ),
            "shuffle" => Self::Shuffle,
            "loop" => Self::Loop,
            "finish" => Self::Finish,
            "download" | "save" => Self::Download(parse_row(rest)?),
            "list" | "ls" => Self::List,
            "status" => Self::Status,
            "genres" => Self::Genres,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(AppError::InvalidCommand(format!(
                    "unknown command {:?} (try help)",
                    other
                )))
            }
        };

        Ok(command)
    }
}

fn parse_search(rest: &str) -> Result<SearchQuery, AppError> {
    let (artist_only, text) = match rest.strip_prefix("-a") {
        Some(text) if text.is_empty() || text.starts_with(char::is_whitespace) => {
            (true, text.trim())
        }
        _ => (false, rest),
    };
    if text.is_empty() {
        return Err(AppError::InvalidCommand("search needs some text".into()));
    }
    Ok(SearchQuery::new(text).artist_only(artist_only))
}

fn parse_row(rest: &str) -> Result<usize, AppError> {
    let number: usize = parse_number(rest, "track number")?;
    number
        .checked_sub(1)
        .ok_or_else(|| AppError::InvalidCommand("track numbers start at 1".into()))
}

fn parse_number<T: FromStr>(rest: &str, what: &str) -> Result<T, AppError> {
    rest.parse()
        .map_err(|_| AppError::InvalidCommand(format!("expected {}, got {:?}", what, rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!("owned".parse::<ShellCommand>().unwrap(), ShellCommand::Owned);
        assert_eq!(" Next ".parse::<ShellCommand>().unwrap(), ShellCommand::Next);
        assert_eq!("q".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn track_numbers_are_one_based() {
        assert_eq!("play 1".parse::<ShellCommand>().unwrap(), ShellCommand::Play(0));
        assert_eq!(
            "download 3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Download(2)
        );
        assert!("play 0".parse::<ShellCommand>().is_err());
        assert!("play x".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn popular_takes_genre_label() {
        assert_eq!(
            "popular drum & bass".parse::<ShellCommand>().unwrap(),
            ShellCommand::Popular(Genre::DrumAndBass)
        );
        assert!(matches!(
            "popular polka".parse::<ShellCommand>(),
            Err(AppError::Core(_))
        ));
    }

    #[test]
    fn search_with_artist_flag() {
        assert_eq!(
            "search -a Burial".parse::<ShellCommand>().unwrap(),
            ShellCommand::Search(SearchQuery::new("Burial").artist_only(true))
        );
        assert_eq!(
            "search -ambient".parse::<ShellCommand>().unwrap(),
            ShellCommand::Search(SearchQuery::new("-ambient"))
        );
        assert!("search".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn mode_takes_menu_label() {
        assert_eq!(
            "mode Repeat Single".parse::<ShellCommand>().unwrap(),
            ShellCommand::Mode(PlaybackMode::RepeatCurrent)
        );
        assert!("mode sideways".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn volume_range() {
        assert_eq!("volume 40".parse::<ShellCommand>().unwrap(), ShellCommand::Volume(40));
        assert!("volume 400".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn unknown_command() {
        assert!(matches!(
            "dance".parse::<ShellCommand>(),
            Err(AppError::InvalidCommand(_))
        ));
    }
}
