use memorito_core::*;
use memorito_protocol::{GameStats, HistoryEntry, ShellReply};
use std::io::{self, Write};

pub fn draw_board<G: BoardGenerator>(
    out: &mut impl Write,
    session: &GameSession<G>,
) -> io::Result<()> {
    let grid = session.grid_view();
    let columns = Position::from(session.shape().columns);

    for (row, cells) in grid.rows().into_iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            let position = row as Position * columns + column as Position;
            let label = match cell {
                CardView::FaceDown => format!("[{position:>2}]"),
                CardView::FaceUp(face) => format!(" {:<3}", face.to_string()),
                CardView::Matched(face) => format!("({face})"),
            };
            write!(out, "{label:<6}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn draw_counters(
    out: &mut impl Write,
    counters: Counters,
    track_efficiency: bool,
) -> io::Result<()> {
    write!(out, "Flips: {}  Misses: {}", counters.flips, counters.misses)?;
    if track_efficiency {
        if let Some(efficiency) = counters.efficiency() {
            write!(out, "  Efficiency: {efficiency}%")?;
        }
    }
    writeln!(out)
}

pub fn draw_revealed(
    out: &mut impl Write,
    faces: impl Iterator<Item = CardFace>,
) -> io::Result<()> {
    let faces: Vec<String> = faces.map(|face| face.to_string()).collect();
    if !faces.is_empty() {
        writeln!(out, "Revealed: {}", faces.join(" "))?;
    }
    Ok(())
}

pub fn describe_event(event: SessionEvent) -> String {
    match event {
        SessionEvent::Flipped { position, card } => format!("{} at {}", card.face, position),
        SessionEvent::Matched { first, second } => format!("Match! {first} and {second}"),
        SessionEvent::Mismatched { first, second } => format!("No match for {first} and {second}"),
        SessionEvent::RoundComplete {
            flip_count,
            miss_count,
        } => format!("All pairs found in {flip_count} flips with {miss_count} misses"),
    }
}

pub fn draw_summary(out: &mut impl Write, summary: &RoundSummary) -> io::Result<()> {
    writeln!(out, "Total Flips: {}", summary.flip_count)?;
    writeln!(out, "Missed Matches: {}", summary.miss_count)?;
    if let Some(efficiency) = summary.efficiency {
        writeln!(out, "Efficiency: {efficiency}%")?;
    }
    Ok(())
}

pub fn draw_history(out: &mut impl Write, history: &[HistoryEntry]) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "No rounds played yet. Start one to see your history!");
    }
    for entry in history {
        write!(out, "{:<12} Cards: {:<3} Flips: {}", entry.date, entry.cards, entry.flips)?;
        if let Some(efficiency) = entry.efficiency {
            write!(out, "  Efficiency: {efficiency}%")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn draw_stats(out: &mut impl Write, stats: &GameStats) -> io::Result<()> {
    writeln!(out, "Games: {}", stats.total_games)?;
    writeln!(out, "Total flips: {}", stats.total_flips)?;
    writeln!(out, "Average flips: {}", stats.average_flips)?;
    if let Some(average) = stats.average_efficiency {
        writeln!(out, "Average efficiency: {average}%")?;
    }
    if let Some(best) = stats.best_efficiency {
        writeln!(out, "Best efficiency: {best}%")?;
    }
    Ok(())
}

pub fn describe_reply(reply: &ShellReply) -> String {
    match reply {
        ShellReply::Done => "Done".to_owned(),
        ShellReply::Saved { path } => format!("Saved game data to {}", path.display()),
        ShellReply::Loaded { path, entries } => {
            format!("Loaded {} history entries from {}", entries, path.display())
        }
        ShellReply::Window(window) => format!(
            "Window {}x{}{}{}",
            window.width,
            window.height,
            if window.is_maximized { ", maximized" } else { "" },
            if window.is_full_screen { ", full screen" } else { "" },
        ),
        ShellReply::Failed { message } => format!("Failed: {message}"),
    }
}
