use std::io;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::client::QueryClient;
use crate::error::CommandError;
use crate::state::{SortKey, UserSelector};
use crate::view::SearchView;

const HELP: &str = "\
Commands:
  search <text>               search users by login (the first match is selected)
  select <login|#n>           show the repositories of another user from the result
  sort <none|stars|forks>     order the repositories
  show                        print the current view
  help                        print this help
  quit                        leave
";

/// One line of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Select(UserSelector),
    Sort(SortKey),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line.trim_end(), ""),
        };

        match word.to_ascii_lowercase().as_str() {
            // anything after the separator is the query, trailing whitespace included
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "select" | "u" => rest.parse().map(Command::Select),
            "sort" => {
                if rest.trim().is_empty() {
                    return Err(CommandError::MissingArgument("sort key"));
                }
                rest.parse().map(Command::Sort)
            }
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Run the view once: search, select (the first user unless `user` names
/// another), sort, and print the page.
pub async fn run_once<C, W>(
    view: &mut SearchView<C>,
    query: &str,
    user: Option<&UserSelector>,
    sort: SortKey,
    out: &mut W,
) -> io::Result<()>
where
    C: QueryClient,
    W: AsyncWrite + Unpin,
{
    view.set_query(query);
    view.change_sort(sort);
    match user {
        Some(selector) => {
            view.search().await;
            view.select(selector).await;
        }
        None => {
            view.submit_search().await;
        }
    }
    out.write_all(view.render().as_bytes()).await?;
    out.flush().await
}

/// Read commands line by line until `quit` or end of input.
pub async fn run_interactive<C, R, W>(
    view: &mut SearchView<C>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    C: QueryClient,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(b"GitHub user search. Type 'help' for commands.\n").await?;
    let mut lines = input.lines();

    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected command '{}': {}", line, e);
                out.write_all(format!("{}\n", e).as_bytes()).await?;
                continue;
            }
        };
        debug!("Command: {:?}", command);

        match command {
            Command::Search(text) => {
                view.set_query(text);
                view.submit_search().await;
            }
            Command::Select(selector) => {
                view.select(&selector).await;
            }
            Command::Sort(key) => view.change_sort(key),
            Command::Show => {}
            Command::Help => {
                out.write_all(HELP.as_bytes()).await?;
                continue;
            }
            Command::Quit => break,
        }
        out.write_all(view.render().as_bytes()).await?;
    }

    out.flush().await
}
