// Prompt templates for course roadmaps and per-module study suggestions.

/// Roadmap prompt. Replace `{description}` before sending.
pub const ROADMAP_PROMPT: &str = r#"You are a tutor. Generate a detailed course roadmap based on the following description: {description}

Return the result as valid JSON with an array named "modules" containing 4 module objects. Each module should strictly follow this format:

{
  "modules": [
    {
      "title": "Module Title",
      "description": "Module description.",
      "order": 1,
      "contents": [
        {
          "type": "video",
          "title": "Content Title",
          "description": "Description of content.",
          "resource": {
            "url": "",
            "duration": 0,
            "publicId": ""
          },
          "tags": ["tag1", "tag2"]
        }
      ],
      "quiz": {
        "questions": [
          {
            "question": "Question text?",
            "options": {
              "a": "Option A",
              "b": "Option B",
              "c": "Option C",
              "d": "Option D"
            },
            "answer": "a",
            "conceptTags": ["concept1"],
            "difficulty": 1
          }
        ],
        "passingScore": 70
      }
    }
  ]
}

Important: Return only valid JSON with exactly 4 modules. Each module should have 2-3 content items and 2-3 quiz questions."#;

/// Module suggestion prompt.
/// Replace `{performance}`, `{course_id}`, `{student_id}` and `{modules}` before sending.
pub const MODULE_SUGGESTIONS_PROMPT: &str = r#"You are an educational AI assistant. Based on the following information, generate three personalized learning suggestions for each module to help the student improve.

Student Performance: {performance}% overall
Course ID: {course_id}
Student ID: {student_id}

Modules:
{modules}

For each module, provide 3 specific, actionable suggestions that will help the student better understand the content and improve their performance. Each suggestion should be concise (maximum 1-2 sentences) and practical.

Format your response as a valid JSON object with the following structure:
{
    "suggestions": {
        "ModuleName1": [
            "Suggestion 1",
            "Suggestion 2",
            "Suggestion 3"
        ],
        "ModuleName2": [
            "Suggestion 1",
            "Suggestion 2",
            "Suggestion 3"
        ]
    }
}

Be specific in your suggestions, and tailor them to a student with the given performance level."#;
