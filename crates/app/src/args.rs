use std::fmt;
use std::time::Duration;

use quiz_core::model::{ItemGroup, TeamCount};

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTeams { raw: String },
    InvalidGroup { raw: String },
    InvalidTimeUnit { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTeams { raw } => {
                write!(f, "invalid --teams value: {raw} (expected 1-{})", TeamCount::MAX)
            }
            ArgsError::InvalidGroup { raw } => {
                write!(f, "invalid --group value: {raw} (expected barn, poultry, pets or all)")
            }
            ArgsError::InvalidTimeUnit { raw } => write!(f, "invalid --time-unit-ms value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--teams <1-4>] [--group <barn|poultry|pets|all>]");
    eprintln!("                      [--time-unit-ms <ms>] [--seed <u64>] [--mute]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --teams 1 (solo)");
    eprintln!("  --group all");
    eprintln!("  --time-unit-ms 1000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_TEAMS, QUIZ_GROUP, QUIZ_TIME_UNIT_MS, QUIZ_SEED, QUIZ_MUTE, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub teams: TeamCount,
    pub group: Option<ItemGroup>,
    pub time_unit: Duration,
    pub seed: Option<u64>,
    pub mute: bool,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_teams(raw: String) -> Result<TeamCount, ArgsError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| TeamCount::new(n).ok())
        .ok_or(ArgsError::InvalidTeams { raw })
}

fn parse_group(raw: String) -> Result<Option<ItemGroup>, ArgsError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    ItemGroup::from_slug(&raw)
        .map(Some)
        .ok_or(ArgsError::InvalidGroup { raw })
}

fn parse_time_unit(raw: String) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ArgsError::InvalidTimeUnit { raw }),
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    /// Parse flags, falling back to environment variables read through `env`.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut parsed = Self {
            teams: env("QUIZ_TEAMS")
                .map(parse_teams)
                .transpose()?
                .unwrap_or(TeamCount::SOLO),
            group: env("QUIZ_GROUP").map(parse_group).transpose()?.flatten(),
            time_unit: env("QUIZ_TIME_UNIT_MS")
                .map(parse_time_unit)
                .transpose()?
                .unwrap_or(Duration::from_secs(1)),
            seed: env("QUIZ_SEED").map(parse_seed).transpose()?,
            mute: env("QUIZ_MUTE").is_some_and(|value| matches!(value.as_str(), "1" | "true")),
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--teams" => parsed.teams = parse_teams(require_value(&mut args, "--teams")?)?,
                "--group" => parsed.group = parse_group(require_value(&mut args, "--group")?)?,
                "--time-unit-ms" => {
                    parsed.time_unit =
                        parse_time_unit(require_value(&mut args, "--time-unit-ms")?)?;
                }
                "--seed" => parsed.seed = Some(parse_seed(require_value(&mut args, "--seed")?)?),
                "--mute" => parsed.mute = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(parsed))
    }
}
