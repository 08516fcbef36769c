use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::Write;

use crate::types::Draw;
use crate::utils::{DATE_OUTPUT_WIDTH, format_draw_date};

pub const BONUS_LABEL: &str = "Zz:";

/// Renders `DD.MM.YYYY HH:MM NN NN NN NN NN NN Zz: NN`.
pub fn format_line(draw: &Draw) -> String {
    let mut line = match &draw.date {
        Some(date) => format_draw_date(date),
        None => " ".repeat(DATE_OUTPUT_WIDTH),
    };
    for number in draw.numbers {
        let _ = write!(line, " {:>2}", number);
    }
    let _ = write!(line, " {} {:>2}", BONUS_LABEL, draw.bonus);
    line
}

pub fn write_text<W: Write>(draws: &[Draw], writer: &mut W) -> Result<()> {
    for draw in draws {
        writeln!(writer, "{}", format_line(draw)).context("write draw line")?;
    }
    writer.flush().context("flush output")?;
    Ok(())
}

pub fn write_json<W: Write>(draws: &[Draw], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, draws).context("serialize draws")?;
    writeln!(writer).context("write draws")?;
    writer.flush().context("flush output")?;
    Ok(())
}
