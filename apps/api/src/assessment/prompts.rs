// Prompt templates for grading, quiz generation and quiz feedback.

/// Grading prompt. Replace `{criteria}`, `{criteria_format}` and `{text}` before sending.
pub const GRADING_PROMPT: &str = r#"You are a grading assistant. Grade the assignment based on the following criteria: {criteria}.
Provide a grade between 1 and 10 for the overall quality of the PDF content, followed by one line descriptions for each criterion.

Output the result in the following JSON format
{
    "grade": (1-10),
{criteria_format}
}

PDF text:
{text}"#;

/// Quiz generation prompt. Replace `{description}` before sending.
pub const QUIZ_PROMPT: &str = r#"Generate five multiple-choice questions based on the provided topics mentioned in the following description: {description}
For each question, provide exactly four options labeled "a", "b", "c", and "d". The answer should be one of the four options: "a", "b", "c", or "d".

Output the result in valid JSON format with double quotes around all keys and values, as follows:

{
    "quiz": [
        {
            "question": "Question text",
            "options": {
                "a": "Option A text",
                "b": "Option B text",
                "c": "Option C text",
                "d": "Option D text"
            },
            "answer": "Correct answer (a, b, c, or d)"
        }
    ]
}"#;

/// Per-question feedback prompt.
/// Replace `{question}`, `{options}`, `{answer}` and `{user_answer}` before sending.
pub const QUIZ_FEEDBACK_PROMPT: &str = r#"You are an AI grading assistant. Provide feedback based on the following question, options, correct answer, and user's answer.

Question: {question}
Options: {options}
Correct Answer: {answer}
User's Answer: {user_answer}

Generate the feedback in valid JSON format, structured as follows:

{
    "feedback": "Your feedback message here."
}

Only give the feedback and keep it polite.
Provide constructive feedback on the user's answer, indicating whether it was correct or not and offering tips for improvement."#;
