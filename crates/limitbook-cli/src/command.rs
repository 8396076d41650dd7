//! Line-oriented command parser for the interactive loop.

use limitbook_types::{Price, Quantity};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  bid <price> <quantity>   rest a buy order, then match
  ask <price> <quantity>   rest a sell order, then match
  buy <quantity>           market buy against resting asks
  sell <quantity>          market sell against resting bids
  show                     print the book
  help                     print this help
  exit | quit              leave
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Bid { price: Price, quantity: Quantity },
    Ask { price: Price, quantity: Quantity },
    Buy { quantity: Quantity },
    Sell { quantity: Quantity },
    Show,
    Help,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` expects {expected} argument(s), got {got}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{name} must be an integer, got `{value}`")]
    NotAnInteger { name: &'static str, value: String },
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword.to_ascii_lowercase().as_str() {
        "bid" => {
            let [price, quantity] = expect_args::<2>("bid", &args)?;
            Command::Bid {
                price: integer("price", price)?,
                quantity: integer("quantity", quantity)?,
            }
        }
        "ask" => {
            let [price, quantity] = expect_args::<2>("ask", &args)?;
            Command::Ask {
                price: integer("price", price)?,
                quantity: integer("quantity", quantity)?,
            }
        }
        "buy" => {
            let [quantity] = expect_args::<1>("buy", &args)?;
            Command::Buy {
                quantity: integer("quantity", quantity)?,
            }
        }
        "sell" => {
            let [quantity] = expect_args::<1>("sell", &args)?;
            Command::Sell {
                quantity: integer("quantity", quantity)?,
            }
        }
        "show" => {
            expect_args::<0>("show", &args)?;
            Command::Show
        }
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        _ => return Err(CommandError::Unknown(keyword.to_string())),
    };
    Ok(Some(command))
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&'a str; N]>::try_from(args).map_err(|_| CommandError::Arity {
        command,
        expected: N,
        got: args.len(),
    })
}

fn integer(name: &'static str, value: &str) -> Result<i64, CommandError> {
    value.parse().map_err(|_| CommandError::NotAnInteger {
        name,
        value: value.to_string(),
    })
}
