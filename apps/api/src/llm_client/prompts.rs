#![allow(dead_code)]

// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to all book-producing prompts.
pub const REAL_BOOKS_INSTRUCTION: &str = "\
    CRITICAL: Only name real, published books. \
    Do NOT invent titles, authors, or plot details. \
    If you are not confident a book exists, omit it entirely. \
    Never pad the result list to reach a count.";

/// Instruction for placeholder cover art in model-produced book records.
pub const COVER_IMAGE_INSTRUCTION: &str = "\
    For each book, set cover_image to a placeholder URL of the form \
    https://picsum.photos/seed/<short-slug>/300/450 where <short-slug> is \
    derived from the title, and set image_hint to exactly two lowercase \
    keywords describing a fitting cover (e.g. 'white whale').";
