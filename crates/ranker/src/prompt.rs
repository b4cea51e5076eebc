//! Prompt construction for the curation request.

use catalog::{Candidate, SearchQuery};

use crate::decode::CANONICAL_LIST_KEY;

/// System message sent with every curation request
pub const SYSTEM_PROMPT: &str = "You are a precise JSON generator.";

/// Build the user prompt enumerating the candidates and the curation goals.
pub fn build_prompt(query: &SearchQuery, candidates: &[Candidate], limit: usize) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(candidates.len() + 10);
    lines.push(
        "You are a helpful music curator. Given YouTube candidate videos, return the top picks as JSON."
            .to_string(),
    );
    lines.push(
        "Goals: diversity, quality (official videos preferred), matching genre/mood/era/language if provided."
            .to_string(),
    );
    lines.push(format!("Genre: {}", query.genre()));
    if let Some(mood) = query.mood() {
        lines.push(format!("Mood: {}", mood));
    }
    if let Some(era) = query.era() {
        lines.push(format!("Era: {}", era));
    }
    if let Some(language) = query.language() {
        lines.push(format!("Language preference: {}", language));
    }
    lines.push(format!("Limit: {}", limit));
    lines.push("Candidates:".to_string());
    for candidate in candidates {
        lines.push(format!(
            "- title={} | channel={} | videoId={} | publishedAt={}",
            candidate.title.as_deref().unwrap_or(""),
            candidate.channel_title.as_deref().unwrap_or(""),
            candidate.video_id,
            candidate.published_at.as_deref().unwrap_or("")
        ));
    }
    lines.push(format!(
        "Only use videoId values from the candidates. Return ONLY a valid JSON object: \
         {{\"{}\": [{{title, videoId, channelTitle, url, reason, tags, publishedAt}}]}}",
        CANONICAL_LIST_KEY
    ));
    lines.join("\n")
}
