// Prompt templates for student profiling.

/// Tags a student description may be mapped to.
pub const TAG_CATALOGUE: &[&str] = &[
    "Programming",
    "Data Science",
    "Machine Learning",
    "Artificial Intelligence",
    "Web Development",
    "Mobile Development",
    "Cloud Computing",
    "Cybersecurity",
    "Software Engineering",
    "Database Management",
    "DevOps",
    "UI/UX Design",
    "Game Development",
    "Blockchain",
    "Internet of Things (IoT)",
    "Big Data",
    "Business Analytics",
    "Project Management",
    "Digital Marketing",
    "Finance",
    "Entrepreneurship",
    "Leadership",
    "Communication Skills",
    "Creative Writing",
    "Graphic Design",
    "Photography",
    "Music Production",
    "Language Learning",
    "Mathematics",
    "Physics",
    "Biology",
    "Chemistry",
    "History",
    "Psychology",
    "Philosophy",
];

/// Tag assignment prompt. Replace `{about}` and `{tags}` before sending.
pub const TAG_ASSIGNMENT_PROMPT: &str = r#"You are a tag assignment assistant. Analyze the following student description and assign the top 5 most relevant tags from the provided list. The tags should be relevant to the student's interests, skills, and goals. The tags returned should be diversified and cover a range of topics. If the student description is too vague, look for keywords like creative, technology etc. and assign tags accordingly.

Student Description:
{about}

Available Tags:
{tags}.

Output the result in valid JSON format with double quotes around all keys and values, as follows:

{
    "interests": ["Tag1", "Tag2", "Tag3"]
}

Only include tags that are highly relevant to the student's description."#;
