use std::io::Write;

use owo_colors::OwoColorize;
use papersum_core::present::{
    AnalysisView, NO_RESULTS_MESSAGE, PaperCard, PaperListView, ToggleLabel,
};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print every card in `view`, or the empty-result message.
pub fn print_paper_list(
    w: &mut dyn Write,
    view: &PaperListView<'_>,
    color: ColorMode,
) -> std::io::Result<()> {
    match view {
        PaperListView::Papers(cards) => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    writeln!(w)?;
                }
                print_paper_card(w, card, color)?;
            }
        }
        PaperListView::Empty | PaperListView::Idle => {
            if color.enabled() {
                writeln!(w, "{}", NO_RESULTS_MESSAGE.dimmed())?;
            } else {
                writeln!(w, "{NO_RESULTS_MESSAGE}")?;
            }
        }
        // The CLI awaits results before printing.
        PaperListView::Loading { .. } => {}
    }
    Ok(())
}

/// Print one paper: title, byline, link, tags, abstract, summary.
pub fn print_paper_card(
    w: &mut dyn Write,
    card: &PaperCard<'_>,
    color: ColorMode,
) -> std::io::Result<()> {
    let paper = card.paper;
    let byline = card.byline();
    let tags = paper
        .categories
        .iter()
        .map(|c| format!("[{c}]"))
        .collect::<Vec<_>>()
        .join(" ");

    if color.enabled() {
        writeln!(w, "{}", paper.title.bold())?;
        if !byline.is_empty() {
            writeln!(w, "{}", byline.dimmed())?;
        }
        writeln!(w, "{}", card.link.cyan().underline())?;
        if !tags.is_empty() {
            writeln!(w, "{}", tags.yellow())?;
        }
    } else {
        writeln!(w, "{}", paper.title)?;
        if !byline.is_empty() {
            writeln!(w, "{byline}")?;
        }
        writeln!(w, "{}", card.link)?;
        if !tags.is_empty() {
            writeln!(w, "{tags}")?;
        }
    }

    if !card.abstract_text.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", card.abstract_text)?;
    }
    if card.toggle == Some(ToggleLabel::ShowMore) {
        let hint = "(use --expand to show the full abstract)";
        if color.enabled() {
            writeln!(w, "{}", hint.dimmed())?;
        } else {
            writeln!(w, "{hint}")?;
        }
    }

    if !paper.summary.is_empty() {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "{}", "AI Summary".bold())?;
        } else {
            writeln!(w, "AI Summary")?;
        }
        writeln!(w, "{}", paper.summary)?;
    }
    Ok(())
}

/// Print the summary and numbered insights.
pub fn print_analysis(
    w: &mut dyn Write,
    view: &AnalysisView<'_>,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "Summary".bold().underline())?;
    } else {
        writeln!(w, "Summary")?;
    }
    writeln!(w, "{}", view.summary)?;

    if !view.insights.is_empty() {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "{}", "Insights".bold().underline())?;
        } else {
            writeln!(w, "Insights")?;
        }
        for (i, insight) in view.insights.iter().enumerate() {
            if color.enabled() {
                writeln!(w, "{} {}", format!("{}.", i + 1).cyan(), insight)?;
            } else {
                writeln!(w, "{}. {}", i + 1, insight)?;
            }
        }
    }
    Ok(())
}
