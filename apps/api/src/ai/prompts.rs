#![allow(dead_code)]

// All LLM prompt constants for the AI module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for recommendations — enforces JSON-only output.
pub const RECOMMEND_SYSTEM: &str =
    "You are a book recommendation expert with deep knowledge of literature \
    across every genre. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Recommendation prompt template.
/// Replace: {real_books_instruction}, {reading_history_json},
///          {genre_preferences_json}, {ratings_json}
pub const RECOMMEND_PROMPT_TEMPLATE: &str = r#"{real_books_instruction}

Based on the user's reading history, genre preferences, and ratings, recommend
books the user is likely to enjoy. Weigh highly-rated titles more than
low-rated ones, and do not recommend anything already in the reading history.

READING HISTORY (titles the user has read):
{reading_history_json}

GENRE PREFERENCES:
{genre_preferences_json}

RATINGS (title to rating, 1-5):
{ratings_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "recommended_books": ["Title One", "Title Two"]
}

Recommend between 3 and 8 books."#;

/// System prompt for natural-language search — enforces JSON-only output.
pub const SEARCH_SYSTEM: &str =
    "You are a book search engine backed by knowledge of real published books. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Search prompt template.
/// Replace: {real_books_instruction}, {cover_image_instruction}, {query}
pub const SEARCH_PROMPT_TEMPLATE: &str = r#"{real_books_instruction}

{cover_image_instruction}

Based on the user's query, find relevant books. The query may name a title, an
author, a genre, a theme, or a mood.

USER QUERY:
{query}

Return a JSON object with this EXACT schema (no extra fields):
{
  "books": [
    {
      "id": "gutenberg-2701",
      "title": "Moby Dick",
      "author": "Herman Melville",
      "cover_image": "https://picsum.photos/seed/moby-dick/300/450",
      "image_hint": "white whale",
      "genre": "Adventure",
      "rating": 4.5,
      "description": "A sailor recounts the obsessive quest of Ahab for revenge on a white whale."
    }
  ]
}

Rules:
1. `id` is the Project Gutenberg identifier prefixed with "gutenberg-" when the
   book is in the public domain and you know the number; otherwise a short
   unique slug of the title
2. `rating` is your best estimate of reader consensus on a 1-5 scale
3. `description` is one or two sentences, no spoilers

Find up to 10 books."#;
