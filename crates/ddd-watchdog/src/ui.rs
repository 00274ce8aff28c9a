// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal UI (§4.9): scoped acquisition of terminal control with
//! guaranteed release on every exit path, and the progress rendering the
//! worker drives while it runs. Pure ASCII plus two bar glyphs; no TTY
//! library dependency.

use std::io::Write;

const BAR_WIDTH: usize = 20;
const BAR_FILLED: char = '#';
const BAR_EMPTY: char = '-';
const LINES_PER_UPDATE: usize = 5;
const SESSION_TRUNCATE: usize = 15;

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Triage,
    Extraction,
    Storage,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Stage::Triage => "triage",
            Stage::Extraction => "extraction",
            Stage::Storage => "storage",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Progress {
    pub transcripts_total: usize,
    pub transcripts_completed: usize,
    pub current_session: String,
    pub stage: Stage,
    pub stage_progress: usize,
    pub stage_total: usize,
}

/// Render a `[####----]` bar of `width` glyphs; `total=0` renders empty.
pub fn render_bar(current: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return BAR_EMPTY.to_string().repeat(width);
    }
    let filled = ((current as f64 / total as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "{}{}",
        BAR_FILLED.to_string().repeat(filled),
        BAR_EMPTY.to_string().repeat(width - filled)
    )
}

fn truncate_session(session: &str) -> String {
    if session.chars().count() <= SESSION_TRUNCATE {
        session.to_string()
    } else {
        let truncated: String = session.chars().take(SESSION_TRUNCATE).collect();
        format!("{truncated}...")
    }
}

/// Scoped terminal handle: hides the cursor on construction, shows it again
/// on drop (including unwind) so a panic mid-render never leaves the
/// terminal in a broken state.
pub struct Terminal<W: Write> {
    out: W,
    rendered_lines: usize,
}

impl<W: Write> Terminal<W> {
    pub fn new(mut out: W) -> Self {
        let _ = write!(out, "{HIDE_CURSOR}");
        let _ = out.flush();
        Self { out, rendered_lines: 0 }
    }

    fn clear_previous(&mut self) {
        for _ in 0..self.rendered_lines {
            let _ = write!(self.out, "\x1b[1A\x1b[2K");
        }
    }

    pub fn update(&mut self, progress: &Progress) {
        self.clear_previous();

        let bar = render_bar(progress.transcripts_completed, progress.transcripts_total, BAR_WIDTH);
        let stage_bar = if progress.stage == Stage::Extraction {
            render_bar(progress.stage_progress, progress.stage_total, BAR_WIDTH)
        } else {
            render_bar(0, 0, BAR_WIDTH)
        };

        let _ = writeln!(self.out, "Memory extraction");
        let _ = writeln!(
            self.out,
            "Transcripts: [{bar}] {}/{}",
            progress.transcripts_completed, progress.transcripts_total
        );
        let _ = writeln!(self.out, "Session: {}", truncate_session(&progress.current_session));
        let _ = writeln!(self.out, "Stage: {}", progress.stage.label());
        let _ = writeln!(self.out, "  [{stage_bar}]");
        let _ = self.out.flush();

        self.rendered_lines = LINES_PER_UPDATE;
    }

    pub fn show_summary(&mut self, transcripts: usize, memories: u32, elapsed: std::time::Duration) {
        self.clear_previous();
        let _ = writeln!(
            self.out,
            "Processed {transcripts} transcript(s), extracted {memories} memor{} in {:.1}s",
            if memories == 1 { "y" } else { "ies" },
            elapsed.as_secs_f64()
        );
        let _ = self.out.flush();
        self.rendered_lines = 0;
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = write!(self.out, "{SHOW_CURSOR}");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod tests;
