//! Lessons command: list the embedded curriculum.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::lessons::LessonCatalog;
use crate::models::Lesson;
use crate::services::candidates_for;
use clap::Args;
use serde::Serialize;

/// List available lessons
#[derive(Debug, Clone, Args)]
pub struct LessonsArgs {
    /// Show the cards of a single lesson
    #[arg(long, value_name = "SLUG")]
    pub lesson: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON summary of one lesson
#[derive(Debug, Serialize)]
struct LessonSummary<'a> {
    slug: &'a str,
    title: &'a str,
    cards: usize,
    arrangements: Vec<&'static str>,
}

/// JSON detail of one card
#[derive(Debug, Serialize)]
struct CardDetail<'a> {
    index: usize,
    subject: &'a str,
    emoji: &'a str,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pool: Option<usize>,
    arrangement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<&'a str>,
    candidates: Vec<usize>,
}

impl LessonsArgs {
    /// Execute the lessons command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = LessonCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load lessons: {e:#}")))?;

        if let Some(slug) = &self.lesson {
            let lesson = catalog.get(slug).ok_or_else(|| {
                CliError::validation(format!(
                    "Unknown lesson '{slug}'. Available: {}",
                    catalog.slugs().join(", ")
                ))
            })?;
            return self.print_lesson(lesson);
        }

        let summaries: Vec<LessonSummary> = catalog
            .lessons()
            .iter()
            .map(|lesson| LessonSummary {
                slug: &lesson.slug,
                title: &lesson.title,
                cards: lesson.card_count(),
                arrangements: lesson.arrangement_kinds(),
            })
            .collect();

        if self.json {
            return print_json(&summaries);
        }

        println!("Lessons ({}):", summaries.len());
        for summary in &summaries {
            println!(
                "  {:<24} {:<28} {} card(s), {}",
                summary.slug,
                summary.title,
                summary.cards,
                summary.arrangements.join("/")
            );
        }
        Ok(())
    }

    fn print_lesson(&self, lesson: &Lesson) -> CliResult<()> {
        let cards: Vec<CardDetail> = lesson
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| CardDetail {
                index,
                subject: &card.subject,
                emoji: &card.emoji,
                count: card.count,
                pool: card.pool,
                arrangement: card.arrangement.to_string(),
                theme: card.theme.as_deref(),
                candidates: candidates_for(card),
            })
            .collect();

        if self.json {
            return print_json(&cards);
        }

        println!("{} ({})", lesson.title, lesson.slug);
        println!("{}", lesson.intro);
        println!();
        for card in &cards {
            let theme = card.theme.map(|t| format!(" [{t}]")).unwrap_or_default();
            let count = match card.pool {
                Some(pool) => format!("count out {} of {pool}", card.count),
                None => card.count.to_string(),
            };
            println!(
                "  {}. {} {} {}, {}{}",
                card.index, count, card.subject, card.emoji, card.arrangement, theme
            );
        }
        Ok(())
    }
}
