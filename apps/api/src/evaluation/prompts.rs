// The evaluation prompt constant. Its exact wording is load-bearing: it pins
// the model to the three report keys the normalizer repairs and the landing
// page renders, so treat any edit as a behavior change.

/// Evaluation prompt template. Replace `{text}` (resume text) and `{jd}`
/// (job description) before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Application Tracking System) evaluator and career coach with 10+ years of experience in tech recruitment. Analyze the resume against the job description and provide ONLY a valid JSON response.

IMPORTANT: Return ONLY the JSON object, no other text, no explanations, no markdown formatting.

Required JSON format:
{
  "JD Match": "85%",
  "MissingKeywords": ["keyword1", "keyword2"],
  "Profile Summary": "Provide a comprehensive 4-5 sentence analysis that: 1) Starts with a clear match percentage assessment and overall fit evaluation, 2) Highlights 2-3 specific strengths from the resume that directly align with the job requirements, 3) Identifies 2-3 specific gaps or areas for improvement with concrete examples, 4) Provides 2-3 actionable recommendations for resume enhancement (e.g., 'Add a project showcasing Python skills', 'Include specific metrics for achievements'), 5) Ends with a motivational note about the candidate's potential. Use specific examples from both the resume and JD to make feedback concrete and actionable."
}

Resume text: {text}

Job Description: {jd}

Remember: Return ONLY the JSON object, nothing else. Make the Profile Summary detailed, specific, and actionable with concrete examples."#;
