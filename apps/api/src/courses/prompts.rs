// Prompt templates for the courses module.

/// Course ranking prompt. Replace `{interests}` and `{courses}` with JSON before sending.
pub const RECOMMENDATION_PROMPT: &str = r#"You are a course recommendation system. Match user interests with course tags to find relevant courses.

User Interests: {interests}

Available Courses: {courses}

Return a JSON object with this exact format:
{
    "recommendedItems": [
        "course_id_1",
        "course_id_2"
    ]
}

Include only course IDs from the Available Courses in the recommendedItems array, sorted by relevance."#;

/// Similar course discovery prompt. Replace `{title}` and `{description}` before sending.
pub const SIMILAR_COURSES_PROMPT: &str = r#"You are a course recommendation assistant. Find similar courses to the one described below from platforms like Khan Academy, Coursera, and YouTube.

Course Title: {title}
Course Description: {description}

Return a JSON object with exactly 5 similar courses from different platforms. For each course, provide:
1. The title of the course
2. The platform it's on (Khan Academy, Coursera, YouTube, Udemy, edX, etc.)
3. A direct URL to the course (use realistic URLs based on the platform)
4. A brief explanation of why this course is relevant (2-3 sentences max)

Return the data in this exact format:
{
    "similarCourses": [
        {
            "title": "Course Title",
            "platform": "Platform Name",
            "url": "https://example.com/course-link",
            "relevance": "Brief explanation of why this course is relevant"
        }
    ]
}

Ensure all URLs are plausible and properly formatted for each platform. For example:
- Coursera URLs typically look like: https://www.coursera.org/learn/course-name
- Khan Academy URLs typically look like: https://www.khanacademy.org/subject/topic/course
- YouTube URLs typically look like: https://www.youtube.com/playlist?list=PLAYLIST_ID"#;
