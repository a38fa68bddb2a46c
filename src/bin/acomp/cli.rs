use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "acomp",
    about = "Alloy composition conversion between atomic, weight, and site fractions",
    version,
    author
)]
pub struct Cli {
    /// Alloy definition file (TOML, one [[element]] table per element)
    #[arg(short, long, value_name = "FILE")]
    pub alloy: PathBuf,

    /// Set a mole fraction (SYM=VALUE), repeatable
    #[arg(
        short = 'x',
        long = "set-x",
        value_name = "SYM=VALUE",
        action = clap::ArgAction::Append
    )]
    pub set_x: Vec<Assignment>,

    /// Set a mass fraction (SYM=VALUE), repeatable
    #[arg(
        short = 'w',
        long = "set-w",
        value_name = "SYM=VALUE",
        action = clap::ArgAction::Append
    )]
    pub set_w: Vec<Assignment>,

    /// Lock the composition after applying the assignments
    #[arg(short, long)]
    pub lock: bool,

    /// Set a mole fraction after locking (SYM=VALUE), repeatable;
    /// exercises the incremental locked update
    #[arg(
        long = "then-x",
        value_name = "SYM=VALUE",
        requires = "lock",
        action = clap::ArgAction::Append
    )]
    pub then_x: Vec<Assignment>,
}

/// One `SYM=VALUE` fraction assignment from the command line.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub symbol: String,
    pub value: f64,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected SYM=VALUE, got '{}'", s))?;
        if symbol.is_empty() {
            return Err(format!("empty element symbol in '{}'", s));
        }
        let value = value
            .parse::<f64>()
            .map_err(|_| format!("invalid fraction value: '{}'", value))?;
        Ok(Self {
            symbol: symbol.to_string(),
            value,
        })
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
