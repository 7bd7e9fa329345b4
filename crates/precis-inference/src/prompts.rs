//! Fixed prompt templates.

/// Build the prompt asking the model to turn an extractive summary into a
/// coherent one.
pub fn refine_summary_prompt(extractive_summary: &str) -> String {
    format!(
        r#"Please create a concise and coherent summary from the following extractive summary.
The sentences were selected using TF-IDF and Aho-Corasick keyword matching algorithms.
Please:
1. Maintain the key information and main ideas
2. Improve flow and coherence between sentences
3. Remove any redundancy while preserving important details
4. Make it readable and well-structured
5. Keep it concise but comprehensive
6. Don't add any text like 'here’s the summary' — just return the summary and nothing else:

Extractive Summary:
{extractive_summary}

Please provide a refined, coherent summary:"#
    )
}

/// Build the prompt asking the model for a JSON paragraph analysis.
pub fn paragraph_analysis_prompt(abstractive_summary: &str) -> String {
    format!(
        r#"
Analyze the following paragraph and return JSON strictly following this exact schema:
{{
  "paragraphType": "string (Type of the paragraph: expository, narrative, descriptive, argumentative, etc.)",
  "mainIdea": "string (The main idea of the paragraph)",
  "keyPoints": ["array of strings with key points"],
  "tone": "string (Tone: positive, negative, neutral, etc.)"
}}

Do NOT add any other fields. Do NOT add any text outside the JSON.

Paragraph:
{abstractive_summary}
"#
    )
}
