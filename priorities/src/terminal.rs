//! Line-oriented terminal front end.
//!
//! Each input line becomes one [`Intent`]; [`run`] forwards intents to a
//! [`TodoManager`] and re-renders after every change, including expiries the
//! manager performs on its own.

use crate::input::{InputError, TodoText};
use crate::manager::TodoManager;
use crate::types::TodoAction;
use crate::view::PrioritiesView;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;

/// Shown instead of the input prompt while the list is full
pub const FULL_NOTICE: &str = "All five slots are taken. Complete one to add another.";

/// What one line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a new entry
    Add(TodoText),
    /// Complete the entry at this 1-based position
    Complete(usize),
    /// Leave
    Quit,
    /// Blank line
    Nothing,
}

impl Intent {
    /// Interpret one input line
    ///
    /// `done <n>` completes, `quit` exits, a blank line is ignored and
    /// anything else is entry text.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") {
            return Self::Quit;
        }
        if let Some(position) = trimmed
            .strip_prefix("done ")
            .and_then(|n| n.trim().parse::<usize>().ok())
        {
            return Self::Complete(position);
        }
        match TodoText::parse(line) {
            Ok(text) => Self::Add(text),
            Err(InputError::Empty) => Self::Nothing,
        }
    }
}

async fn render<W>(out: &mut W, view: &PrioritiesView) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let prompt = if view.is_at_capacity {
        FULL_NOTICE
    } else {
        "Add a priority (or `done <n>`, `quit`):"
    };
    out.write_all(format!("\n{view}{prompt}\n").as_bytes()).await?;
    out.flush().await
}

/// Drive `manager` from `input` until `quit` or end of input
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub async fn run<R, W>(manager: &TodoManager, input: R, mut out: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut applied = manager.subscribe();

    render(&mut out, &manager.view().await).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Intent::parse(&line) {
                    Intent::Quit => break,
                    Intent::Nothing => continue,
                    Intent::Add(text) => {
                        if manager.view().await.is_at_capacity {
                            // Input is disabled while full
                            continue;
                        }
                        manager.add(text).await?;
                    },
                    Intent::Complete(position) => {
                        let Some(id) = manager.view().await.nth(position).map(|t| t.id.clone()) else {
                            out.write_all(format!("No priority #{position}\n").as_bytes()).await?;
                            continue;
                        };
                        manager.complete(&id).await?;
                    },
                }
                render(&mut out, &manager.view().await).await?;
            },
            action = applied.recv() => {
                match action {
                    Ok(TodoAction::Expire { .. }) | Err(RecvError::Lagged(_)) => {
                        render(&mut out, &manager.view().await).await?;
                    },
                    Ok(_) => {},
                    Err(RecvError::Closed) => break,
                }
            },
        }
    }

    Ok(())
}
