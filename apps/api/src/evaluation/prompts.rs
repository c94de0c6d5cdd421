// Prompts for resume evaluation. The strict-JSON prompt is the only contract
// for full evaluations; the score-only prompt backs the legacy score endpoint.

/// Builds the strict-JSON evaluation prompt. The field names, types, score
/// range and verdict values must stay in sync with `models::Evaluation`.
pub fn build_evaluation_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert hiring consultant.
Compare the resume and the job description below.

=== JOB DESCRIPTION ===
{job_description}

=== RESUME ===
{resume_text}

Return a single JSON object with EXACTLY these keys and no others:
{{
  "score": 0,
  "strengths": ["string"],
  "missing_skills": ["string"],
  "verdict": "Consider",
  "recommendations": ["string"]
}}

Field rules:
- "score": integer from 0 to 100 (no decimals, no "/100" suffix)
- "strengths": list of strings, the candidate's strongest matches for this role
- "missing_skills": list of strings, required or preferred skills the resume lacks or shows weakly
- "verdict": exactly one of "Shortlist", "Consider", "Not a Match"
- "recommendations": list of strings, concrete edits that would improve the resume for this role

Use an empty list when a list field has nothing to report.
Return ONLY the JSON object, no commentary and no code fences."#
    )
}

/// Builds the legacy score-only prompt. The job description is optional; without
/// one the model scores general ATS readiness.
pub fn build_score_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let target = match job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        Some(jd) => format!("\n=== JOB DESCRIPTION ===\n{jd}\n"),
        None => String::new(),
    };

    format!(
        r#"You are an Applicant Tracking System (ATS) scanner.
Score how well the resume below would pass automated screening{against}.
{target}
=== RESUME ===
{resume_text}

Respond with exactly one line in this format and nothing else:
ATS Score: X/100"#,
        against = if target.is_empty() {
            ""
        } else {
            " for the job description"
        },
    )
}
