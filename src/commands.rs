// Prefix command parsing for the board channel.
//
// `!setall <world> <offset>` rewinds every rank in a world;
// `!set <world> <rank name> <offset>` rewinds one rank. Rank names may
// contain spaces, so the offset is always the final token. When exactly
// one world is tracked the world token may be omitted.

use chrono::Duration;
use thiserror::Error;

use crate::catalog::{Rank, World};
use crate::offset::{self, OffsetParseError};
use crate::store::StoreError;

const SET_USAGE: &str = "!set <world> <rank name> <\u{00B1}HH:MM|\u{00B1}hours>";
const SETALL_USAGE: &str = "!setall <world> <\u{00B1}HH:MM|\u{00B1}hours>";

/// A validated timer command. Offsets are applied as `now - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Offset every rank in one world.
    SetAll { world: World, offset: Duration },
    /// Offset a single rank.
    Set {
        world: World,
        rank: Rank,
        offset: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown world '{0}'")]
    UnknownWorld(String),
    #[error("world '{0}' is not tracked here")]
    UntrackedWorld(String),
    #[error("unknown rank '{0}'")]
    UnknownRank(String),
    #[error(transparent)]
    BadOffset(#[from] OffsetParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a channel message. `None` when the message is not one of our
/// commands at all (no `!` prefix, or some other bot's verb); `Some(Err)`
/// when it is ours but malformed. Nothing here touches the store.
pub fn parse_command(content: &str, tracked: &[World]) -> Option<Result<Command, CommandError>> {
    let rest = content.trim().strip_prefix('!')?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let verb = tokens.first()?;

    if verb.eq_ignore_ascii_case("setall") {
        Some(parse_setall(&tokens[1..], tracked))
    } else if verb.eq_ignore_ascii_case("set") {
        Some(parse_set(&tokens[1..], tracked))
    } else {
        None
    }
}

fn parse_setall(args: &[&str], tracked: &[World]) -> Result<Command, CommandError> {
    let (world, offset_token) = match args {
        [world, offset] => (resolve_world(world, tracked)?, *offset),
        // Single tracked world: the world token may be omitted
        [offset] if tracked.len() == 1 => (tracked[0], *offset),
        _ => return Err(CommandError::Usage(SETALL_USAGE)),
    };
    let offset = offset::parse_offset(offset_token)?;
    Ok(Command::SetAll { world, offset })
}

fn parse_set(args: &[&str], tracked: &[World]) -> Result<Command, CommandError> {
    let Some((offset_token, head)) = args.split_last() else {
        return Err(CommandError::Usage(SET_USAGE));
    };
    let Some((first, rank_tokens)) = head.split_first() else {
        return Err(CommandError::Usage(SET_USAGE));
    };

    let (world, rank_name) = match World::from_name(first) {
        Some(world) => {
            if !tracked.contains(&world) {
                return Err(CommandError::UntrackedWorld(first.to_string()));
            }
            if rank_tokens.is_empty() {
                return Err(CommandError::Usage(SET_USAGE));
            }
            (world, rank_tokens.join(" "))
        }
        // No world token: fall back to the single tracked world
        None if tracked.len() == 1 => (tracked[0], head.join(" ")),
        None => return Err(CommandError::UnknownWorld(first.to_string())),
    };

    let rank = Rank::from_name(&rank_name).ok_or(CommandError::UnknownRank(rank_name))?;
    let offset = offset::parse_offset(offset_token)?;
    Ok(Command::Set {
        world,
        rank,
        offset,
    })
}

fn resolve_world(token: &str, tracked: &[World]) -> Result<World, CommandError> {
    let world =
        World::from_name(token).ok_or_else(|| CommandError::UnknownWorld(token.to_string()))?;
    if !tracked.contains(&world) {
        return Err(CommandError::UntrackedWorld(token.to_string()));
    }
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTI: [World; 3] = [World::Halicarnassus, World::Maduin, World::Seraph];
    const SINGLE: [World; 1] = [World::Halicarnassus];

    #[test]
    fn test_not_a_command() {
        assert_eq!(parse_command("hello there", &MULTI), None);
        assert_eq!(parse_command("!help", &MULTI), None);
        assert_eq!(parse_command("", &MULTI), None);
        assert_eq!(parse_command("!", &MULTI), None);
    }

    #[test]
    fn test_setall() {
        let cmd = parse_command("!setall Maduin 1.5", &MULTI).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::SetAll {
                world: World::Maduin,
                offset: Duration::minutes(90),
            }
        );
    }

    #[test]
    fn test_set_with_multiword_rank() {
        let cmd = parse_command("!set Halicarnassus Sally the Sweeper -2:30", &MULTI)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                world: World::Halicarnassus,
                rank: Rank::SallyTheSweeper,
                offset: Duration::minutes(-150),
            }
        );
    }

    #[test]
    fn test_set_case_insensitive_names() {
        let cmd = parse_command("!SET maduin QUEEN HAWK 0:10", &MULTI)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                world: World::Maduin,
                rank: Rank::QueenHawk,
                offset: Duration::minutes(10),
            }
        );
    }

    #[test]
    fn test_unknown_world() {
        let err = parse_command("!set Ultros Queen Hawk 1.5", &MULTI)
            .unwrap()
            .unwrap_err();
        assert_eq!(err, CommandError::UnknownWorld("Ultros".to_string()));
    }

    #[test]
    fn test_untracked_world() {
        let err = parse_command("!setall Kraken 1.5", &MULTI).unwrap().unwrap_err();
        assert_eq!(err, CommandError::UntrackedWorld("Kraken".to_string()));
    }

    #[test]
    fn test_unknown_rank() {
        let err = parse_command("!set Maduin Odin 1.5", &MULTI).unwrap().unwrap_err();
        assert_eq!(err, CommandError::UnknownRank("Odin".to_string()));
    }

    #[test]
    fn test_bad_offset() {
        let err = parse_command("!set Maduin Queen Hawk soon", &MULTI)
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, CommandError::BadOffset(_)));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            parse_command("!set", &MULTI).unwrap().unwrap_err(),
            CommandError::Usage(SET_USAGE)
        );
        assert_eq!(
            parse_command("!set Maduin 1.5", &MULTI).unwrap().unwrap_err(),
            CommandError::Usage(SET_USAGE)
        );
        assert_eq!(
            parse_command("!setall Maduin", &MULTI).unwrap().unwrap_err(),
            CommandError::Usage(SETALL_USAGE)
        );
    }

    #[test]
    fn test_single_world_mode_omits_world_token() {
        let cmd = parse_command("!set Rrax Yity'a 1 1:00", &SINGLE).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                world: World::Halicarnassus,
                rank: Rank::RraxYityaOne,
                offset: Duration::minutes(60),
            }
        );

        let cmd = parse_command("!setall 2.0", &SINGLE).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::SetAll {
                world: World::Halicarnassus,
                offset: Duration::minutes(120),
            }
        );
    }

    #[test]
    fn test_single_world_mode_still_accepts_world_token() {
        let cmd = parse_command("!set Halicarnassus Heshuala 1.5", &SINGLE)
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                world: World::Halicarnassus,
                rank: Rank::Heshuala,
                offset: Duration::minutes(90),
            }
        );
    }

    #[test]
    fn test_single_world_mode_rejects_other_worlds() {
        let err = parse_command("!setall Maduin 1.5", &SINGLE).unwrap().unwrap_err();
        assert_eq!(err, CommandError::UntrackedWorld("Maduin".to_string()));
    }
}
