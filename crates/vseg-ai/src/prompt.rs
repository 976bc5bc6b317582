//! Prompt text for segment finding.

/// System directive sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert video analysis AI. Your task is to analyze a user's questions and determine the precise start and end timestamps (in HH:MM:SS format) within a hypothetical video where the answer to each question is most likely to be found. You must also provide a brief reasoning for your choice. A full transcript of the video is not available, so you must infer the content based on the questions. Assume the video is a standard educational documentary or lecture. Respond only with the JSON array, with no surrounding text.";

/// Build the user prompt listing every question as a bullet.
pub fn build_prompt(questions: &[String]) -> String {
    let bullets: Vec<String> = questions.iter().map(|q| format!("- {}", q)).collect();
    format!(
        "Based on a hypothetical video's content, identify the start and end timestamps for the following questions: \n\n{}",
        bullets.join("\n")
    )
}
