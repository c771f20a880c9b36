use std::io::{self, IsTerminal, Write};

use taskboard_core::datetime::{display_date, display_datetime};
use taskboard_core::filter::{TaskCounts, TaskQuery};
use taskboard_core::model::Task;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip_all, fields(visible = tasks.len()))]
    pub fn print_task_table(
        &self,
        tasks: &[&Task],
        query: &TaskQuery,
        counts: TaskCounts,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if tasks.is_empty() {
            writeln!(out, "No tasks found")?;
            writeln!(out, "{}", query.empty_hint())?;
        } else {
            let rows: Vec<Vec<Cell>> = tasks
                .iter()
                .map(|task| {
                    vec![
                        Cell::toned(task.id.as_str(), Tone::Id),
                        if task.completed {
                            Cell::toned("✓", Tone::Done)
                        } else {
                            Cell::plain("")
                        },
                        Cell::plain(&task.title),
                        Cell::plain(clip(&task.description, DESCRIPTION_WIDTH)),
                        Cell::plain(display_date(task.created_at.as_deref())),
                        Cell::plain(task.comments.len().to_string()),
                    ]
                })
                .collect();

            write_table(&mut out, &TASK_COLUMNS, &rows, self.color)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} shown | {} total | {} pending | {} completed",
            tasks.len(),
            counts.total,
            counts.pending,
            counts.completed
        )?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(task = %task.id))]
    pub fn print_task_info(&self, task: &Task) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "title       {}", task.title)?;
        writeln!(out, "description {}", task.description)?;
        writeln!(
            out,
            "status      {}",
            if task.completed { "completed" } else { "pending" }
        )?;
        writeln!(
            out,
            "created     {}",
            display_datetime(task.created_at.as_deref())
        )?;
        if task.updated_at.is_some() {
            writeln!(
                out,
                "updated     {}",
                display_datetime(task.updated_at.as_deref())
            )?;
        }

        writeln!(out)?;
        if task.comments.is_empty() {
            writeln!(out, "no comments")?;
            return Ok(());
        }

        writeln!(out, "{}", task.comment_summary())?;
        for comment in &task.comments {
            writeln!(
                out,
                "  [{}] {}  {}",
                Tone::Id.paint(comment.id.as_str(), self.color),
                display_datetime(comment.created_at.as_deref()),
                comment.content
            )?;
        }

        Ok(())
    }
}

const TASK_COLUMNS: [&str; 6] = ["ID", "Done", "Title", "Description", "Created", "Comments"];

/// Descriptions longer than this are clipped in the table view.
const DESCRIPTION_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Id,
    Done,
}

impl Tone {
    fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        let code = match self {
            Tone::Id => "33",
            Tone::Done => "32",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// A table cell. Width is measured on `text`; the tone is only applied
/// when the cell is written.
#[derive(Debug, Clone)]
struct Cell {
    text: String,
    tone: Option<Tone>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }

    fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// Clips `text` to at most `max` display columns, ending in `…` when cut.
fn clip(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn write_table<W: Write>(
    mut writer: W,
    headers: &[&str],
    rows: &[Vec<Cell>],
    color: bool,
) -> anyhow::Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .filter_map(|row| row.get(idx).map(Cell::width))
                .fold(UnicodeWidthStr::width(*header), usize::max)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| format!("{header:width$}"))
        .collect();
    writeln!(writer, "{}", header_line.join(" "))?;

    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    writeln!(writer, "{}", rule.join(" "))?;

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let padding = " ".repeat(width.saturating_sub(cell.width()));
                match cell.tone {
                    Some(tone) => format!("{}{padding}", tone.paint(&cell.text, color)),
                    None => format!("{}{padding}", cell.text),
                }
            })
            .collect();
        writeln!(writer, "{}", line.join(" ").trim_end())?;
    }

    Ok(())
}
